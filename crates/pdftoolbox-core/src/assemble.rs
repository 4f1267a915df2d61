//! Page assembly
//!
//! Every operation produces its output the same way: import the objects of
//! one or more source documents into a fresh document, then lay out a new
//! page tree from an ordered list of source pages.
//!
//! The algorithm:
//! 1. Copy inherited page attributes down onto each source page, since the
//!    page is about to leave its original tree
//! 2. Renumber the source's objects sequentially after what was imported
//!    before. IDs cannot collide and stay compact whatever numbers the source
//!    file used.
//! 3. For every requested page, add a shallow copy of its dictionary parented
//!    to the new page tree (so a page requested twice gets two page objects
//!    sharing the same content and resources)
//! 4. Point a new catalog at the tree and prune whatever the old trees kept
//!    alive

use crate::error::ToolboxError;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic Parent chains in malformed files
const MAX_TREE_DEPTH: usize = 64;

/// Pages of one imported document, already remapped into the assembly's ID space
#[derive(Debug, Clone)]
pub struct ImportedPages {
    page_ids: Vec<ObjectId>,
}

impl ImportedPages {
    pub fn len(&self) -> usize {
        self.page_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_ids.is_empty()
    }

    /// Object id of the 1-based page `page`
    pub fn get(&self, page: u32) -> Option<ObjectId> {
        let index = (page as usize).checked_sub(1)?;
        self.page_ids.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.page_ids.iter().copied()
    }
}

/// Builds a new document out of pages taken from source documents
pub struct PageAssembler {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PageAssembler {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Move every object of `source` into the assembly.
    ///
    /// Returns the source's pages in page order; nothing is placed in the
    /// output until [`push_page`](Self::push_page) is called.
    pub fn import(&mut self, mut source: Document) -> Result<ImportedPages, ToolboxError> {
        let first_id = self
            .doc
            .max_id
            .checked_add(1)
            .ok_or_else(|| ToolboxError::OperationError("Object number space exhausted".into()))?;
        source.renumber_objects_with(first_id);

        let source_pages: Vec<ObjectId> = source.get_pages().values().copied().collect();
        for &page_id in &source_pages {
            flatten_inherited_attributes(&mut source, page_id);
        }

        self.doc.objects.extend(std::mem::take(&mut source.objects));
        self.doc.max_id = source.max_id.max(self.doc.max_id);

        Ok(ImportedPages {
            page_ids: source_pages,
        })
    }

    /// Append an imported page to the end of the output
    pub fn push_page(&mut self, page_id: ObjectId) -> Result<(), ToolboxError> {
        let mut page = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| {
                ToolboxError::OperationError(format!("Page object {:?} unusable: {}", page_id, e))
            })?
            .clone();
        page.set("Parent", Object::Reference(self.pages_id));

        let new_id = self.doc.add_object(page);
        self.kids.push(new_id);
        Ok(())
    }

    /// Append all pages of an import, in order
    pub fn push_all(&mut self, pages: &ImportedPages) -> Result<(), ToolboxError> {
        for page_id in pages.iter() {
            self.push_page(page_id)?;
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Write the page tree and catalog, drop unreachable objects, compress streams
    pub fn finish(mut self) -> Document {
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set(
            "Kids",
            Object::Array(self.kids.iter().map(|&id| Object::Reference(id)).collect()),
        );
        pages_dict.set("Count", Object::Integer(self.kids.len() as i64));
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let mut catalog_dict = Dictionary::new();
        catalog_dict.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog_dict.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog_dict);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.prune_objects();
        self.doc.compress();
        self.doc
    }
}

/// Serialize a finished document
pub fn save(mut doc: Document) -> Result<Vec<u8>, ToolboxError> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ToolboxError::OperationError(format!("Save failed: {}", e)))?;
    Ok(buffer)
}

/// Copy attributes the page inherits from its ancestors onto the page itself
fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) {
    let mut inherited = Vec::new();

    if let Ok(page) = doc.get_dictionary(page_id) {
        for key in INHERITABLE_ATTRIBUTES {
            if page.has(key) {
                continue;
            }

            let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
            let mut depth = 0;
            while let Some(parent_id) = parent {
                depth += 1;
                if depth > MAX_TREE_DEPTH {
                    break;
                }
                let Ok(node) = doc.get_dictionary(parent_id) else {
                    break;
                };
                if let Ok(value) = node.get(key) {
                    inherited.push((key, value.clone()));
                    break;
                }
                parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            }
        }
    }

    if let Ok(page) = doc.get_dictionary_mut(page_id) {
        for (key, value) in inherited {
            page.set(key, value);
        }
    }
}
