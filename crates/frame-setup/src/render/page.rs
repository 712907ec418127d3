//! Single-page output documents
//!
//! Both outputs are one page sized to the layout; this module owns the page
//! tree and catalog boilerplate so the pipelines only provide content and
//! resources.

use crate::constants::PDF_VERSION;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// A one-page document under construction
pub struct PageBuilder {
    pub document: Document,
    pages_tree_id: ObjectId,
    width_pt: f64,
    height_pt: f64,
    content_ops: Vec<String>,
    xobjects: Dictionary,
}

impl PageBuilder {
    pub fn new(width_pt: f64, height_pt: f64) -> Self {
        let mut document = Document::with_version(PDF_VERSION);
        let pages_tree_id = document.new_object_id();
        Self {
            document,
            pages_tree_id,
            width_pt,
            height_pt,
            content_ops: Vec::new(),
            xobjects: Dictionary::new(),
        }
    }

    pub fn push_content(&mut self, ops: impl Into<String>) {
        self.content_ops.push(ops.into());
    }

    /// Register an XObject under `name` in the page resources
    pub fn add_xobject(&mut self, name: &str, id: ObjectId) {
        self.xobjects.set(name.as_bytes(), Object::Reference(id));
    }

    /// Assemble the page, page tree and catalog
    pub fn finish(mut self) -> Document {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width_pt as f32),
                Object::Real(self.height_pt as f32),
            ]),
        );

        let mut resources = Dictionary::new();
        if !self.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(self.xobjects));
        }

        let content = self.content_ops.join("");
        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));
        let page_id = self.document.add_object(page_dict);

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ]);
        self.document
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.document.trailer.set("Root", catalog_id);

        self.document
    }
}

/// Width and height of the first page's MediaBox, as written
pub fn page_size(doc: &Document) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().values().next()?;
    let media_box = doc.get_dictionary(page_id).ok()?.get(b"MediaBox").ok()?;
    let values = media_box.as_array().ok()?;
    let number = |obj: &Object| obj.as_float().ok();
    Some((number(values.get(2)?)?, number(values.get(3)?)?))
}
