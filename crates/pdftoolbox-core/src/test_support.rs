//! Fixture PDFs shared by the unit tests

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Build a PDF with `num_pages` pages; page N draws the text `{prefix}-Page-{N}`.
pub fn create_test_pdf(num_pages: u32, prefix: &str) -> Vec<u8> {
    let mut doc = build_document(num_pages, prefix);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Same layout as [`create_test_pdf`], protected with RC4-128 using
/// `password` as both user and owner password.
pub fn create_encrypted_pdf(num_pages: u32, prefix: &str, password: &str) -> Vec<u8> {
    encrypted_fixture(num_pages, prefix, password, password)
}

/// RC4-128 with an empty user password: any reader opens it, only
/// `owner_password` grants full control.
pub fn create_owner_protected_pdf(num_pages: u32, prefix: &str, owner_password: &str) -> Vec<u8> {
    encrypted_fixture(num_pages, prefix, "", owner_password)
}

/// One-page PDF whose page lives at object number `u32::MAX - 1`.
///
/// Written by hand because lopdf's writer emits one xref entry per object
/// number up to the highest one.
pub fn create_high_object_number_pdf(prefix: &str) -> Vec<u8> {
    let far = u32::MAX - 1;
    let content = format!("BT /F1 12 Tf 50 700 Td ({}-Page-1) Tj ET", prefix);
    let objects = [
        (1, "<< /Type /Catalog /Pages 2 0 R >>".to_string()),
        (2, format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", far)),
        (
            3,
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
        ),
        (
            far,
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 3 0 R >>".to_string(),
        ),
    ];

    let mut buffer = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (num, body) in &objects {
        offsets.push(buffer.len());
        buffer.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", num, body).as_bytes());
    }

    let xref_offset = buffer.len();
    let mut xref = String::from("xref\n0 4\n0000000000 65535 f \n");
    for offset in &offsets[..3] {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    xref.push_str(&format!("{} 1\n{:010} 00000 n \n", far, offsets[3]));
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        u64::from(far) + 1,
        xref_offset
    ));
    buffer.extend_from_slice(xref.as_bytes());
    buffer
}

/// Page labels of an unencrypted PDF, in page order
pub fn page_labels(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    labels_of(&doc)
}

/// Page labels of a PDF that needs `password` to open
pub fn page_labels_with_password(bytes: &[u8], password: &str) -> Vec<String> {
    let doc = Document::load_mem_with_password(bytes, password).unwrap();
    labels_of(&doc)
}

pub fn labels_of(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').expect("page text start") + 1;
            let end = text[start..].find(')').expect("page text end") + start;
            text[start..end].to_string()
        })
        .collect()
}

pub fn labels(prefix: &str, pages: &[u32]) -> Vec<String> {
    pages
        .iter()
        .map(|p| format!("{}-Page-{}", prefix, p))
        .collect()
}

fn encrypted_fixture(num_pages: u32, prefix: &str, user: &str, owner: &str) -> Vec<u8> {
    let mut doc = build_document(num_pages, prefix);
    let id = b"fixture-document".to_vec();
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(id.clone(), StringFormat::Literal),
            Object::String(id, StringFormat::Literal),
        ]),
    );

    let version = lopdf::EncryptionVersion::V2 {
        document: &doc,
        owner_password: owner,
        user_password: user,
        key_length: 128,
        permissions: lopdf::Permissions::all(),
    };
    let state = lopdf::EncryptionState::try_from(version).unwrap();
    doc.encrypt(&state).unwrap();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn build_document(num_pages: u32, prefix: &str) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let catalog_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut page_ids: Vec<ObjectId> = Vec::new();
    for page_num in 1..=num_pages {
        let content = format!("BT /F1 12 Tf 50 700 Td ({}-Page-{}) Tj ET", prefix, page_num);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set("Contents", Object::Reference(content_id));
        page_ids.push(doc.add_object(page_dict));
    }

    // MediaBox and Resources live on the Pages node so pages inherit them.
    let mut font_dict = Dictionary::new();
    font_dict.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(font_dict));

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(num_pages as i64));
    pages_dict.set(
        "Kids",
        Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
    );
    pages_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]),
    );
    pages_dict.set("Resources", Object::Dictionary(resources));
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog_dict = Dictionary::new();
    catalog_dict.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog_dict.set("Pages", Object::Reference(pages_id));
    doc.objects.insert(catalog_id, Object::Dictionary(catalog_dict));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}
