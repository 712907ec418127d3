//! XObject creation for the logo
//!
//! The first page of the logo PDF is turned into a Form XObject in the
//! artwork document, which is then drawn once per frame with its own
//! transformation.

use crate::layout::Rect;
use crate::types::{FrameError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

const MAX_TREE_DEPTH: usize = 32;

/// A logo page copied into the output document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoForm {
    /// Object ID of the Form XObject in the output document
    pub id: ObjectId,
    /// The form's bounding box (the source page's MediaBox)
    pub bbox: Rect,
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create a Form XObject from the first page of `source`.
///
/// Resources referenced by the page are deep-copied into `output`; `cache`
/// keeps shared objects from being copied twice.
pub fn create_logo_xobject(
    output: &mut Document,
    source: &Document,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<LogoForm> {
    let page_id = first_page(source)?;
    let page_dict = source.get_dictionary(page_id)?;

    let media_box = page_media_box(source, page_dict)
        .ok_or_else(|| FrameError::Logo("logo page has no MediaBox".to_string()))?;
    let bbox = media_box_rect(&media_box)
        .ok_or_else(|| FrameError::Logo("logo MediaBox is malformed".to_string()))?;

    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", Object::Array(media_box));
    xobject_dict.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited_attribute(source, page_dict, b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    let id = output.add_object(Stream::new(xobject_dict, content_data));
    Ok(LogoForm { id, bbox })
}

fn first_page(doc: &Document) -> Result<ObjectId> {
    doc.get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| FrameError::Logo("logo PDF has no pages".to_string()))
}

/// Look up a page attribute, following `/Parent` for the inheritable keys
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut dict = page_dict;
    // Page trees are shallow; the bound only stops malformed parent cycles
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return doc.dereference(value).ok().map(|(_, obj)| obj);
        }
        let parent = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// The page's MediaBox with any indirect entries resolved
fn page_media_box(doc: &Document, page_dict: &Dictionary) -> Option<Vec<Object>> {
    let media_box = inherited_attribute(doc, page_dict, b"MediaBox")?.as_array().ok()?;
    media_box
        .iter()
        .map(|item| doc.dereference(item).ok().map(|(_, obj)| obj.clone()))
        .collect()
}

/// Convert a `[x0 y0 x1 y1]` box into a normalized rectangle
fn media_box_rect(media_box: &[Object]) -> Option<Rect> {
    if media_box.len() != 4 {
        return None;
    }
    let values: Vec<f64> = media_box.iter().filter_map(extract_number).collect();
    let [x0, y0, x1, y1] = values.as_slice() else {
        return None;
    };
    Some(Rect::new(
        x0.min(*x1),
        y0.min(*y1),
        (x1 - x0).abs(),
        (y1 - y0).abs(),
    ))
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank logo
    };

    match contents {
        Object::Reference(id) => get_single_content_stream(doc, *id),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Get content from a single content stream reference
fn get_single_content_stream(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    if let Ok(stream) = doc.get_object(id)?.as_stream() {
        Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()))
    } else {
        Ok(Vec::new())
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                let content = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                result.extend_from_slice(&content);
                result.push(b'\n');
            }
        }
    }

    Ok(result)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the ID first so reference cycles resolve to it
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        _ => Ok(obj.clone()),
    }
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Get page dimensions (width, height) in points from the MediaBox
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f64, f64)> {
    let page_dict = doc.get_dictionary(page_id)?;

    page_media_box(doc, page_dict)
        .and_then(|mb| media_box_rect(&mb))
        .map(|rect| (rect.width, rect.height))
        .ok_or_else(|| FrameError::Logo("page has no usable MediaBox".to_string()))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One page whose MediaBox and Resources live on the Pages node, with
    /// the MediaBox behind an indirect reference
    fn inherited_logo() -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let media_box_id = doc.add_object(Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(40),
            Object::Integer(20),
        ]));
        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(b"Helvetica".to_vec())),
        ]));
        let resources = Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
        )]);
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            b"BT /F1 12 Tf 2 4 Td (SRG) Tj ET".to_vec(),
        ));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
            ("MediaBox", Object::Reference(media_box_id)),
            ("Resources", Object::Dictionary(resources)),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_inherited_media_box() {
        let doc = inherited_logo();
        let page_id = *doc.get_pages().values().next().unwrap();
        assert_eq!(get_page_dimensions(&doc, page_id).unwrap(), (40.0, 20.0));

        let mut doc = doc;
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        let logo = crate::LogoAsset::from_pdf_bytes("inherited", bytes).unwrap();
        assert_eq!((logo.width_pt, logo.height_pt), (40.0, 20.0));
    }

    #[test]
    fn test_inherited_resources_are_copied() {
        let source = inherited_logo();
        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();

        let form = create_logo_xobject(&mut output, &source, &mut cache).unwrap();
        assert_eq!(form.bbox, Rect::new(0.0, 0.0, 40.0, 20.0));

        let stream = output.get_object(form.id).unwrap().as_stream().unwrap();
        let fonts = stream
            .dict
            .get(b"Resources")
            .and_then(Object::as_dict)
            .and_then(|res| res.get(b"Font"))
            .and_then(Object::as_dict)
            .unwrap();
        let font_id = fonts.get(b"F1").and_then(Object::as_reference).unwrap();
        let font = output.get_dictionary(font_id).unwrap();
        assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");
    }

    #[test]
    fn test_media_box_rect_normalizes() {
        let mb = vec![
            Object::Integer(10),
            Object::Real(20.0),
            Object::Integer(110),
            Object::Integer(70),
        ];
        assert_eq!(media_box_rect(&mb), Some(Rect::new(10.0, 20.0, 100.0, 50.0)));

        let flipped = vec![
            Object::Integer(110),
            Object::Integer(70),
            Object::Integer(10),
            Object::Integer(20),
        ];
        assert_eq!(
            media_box_rect(&flipped),
            Some(Rect::new(10.0, 20.0, 100.0, 50.0))
        );
    }

    #[test]
    fn test_media_box_rect_rejects_garbage() {
        assert_eq!(media_box_rect(&[Object::Integer(0)]), None);
        let mb = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Name(b"Wide".to_vec()),
            Object::Integer(10),
        ];
        assert_eq!(media_box_rect(&mb), None);
    }
}
