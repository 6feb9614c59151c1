use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use memmap2::Mmap;

use crate::config::{A4_HEIGHT, A4_WIDTH};
use crate::error::Error;
use crate::model::Unit;

/// Guard against cyclic `Parent` chains in broken page trees.
const MAX_TREE_DEPTH: usize = 64;

/// A cropped score: one system per page.
pub struct Score {
    pub(super) document: Document,
    pub(super) page_ids: Vec<ObjectId>,
    /// Crop box of every page as `[x0, y0, x1, y1]`, in page order.
    pub(super) boxes: Vec<[f32; 4]>,
    pub units: Vec<Unit>,
}

impl Score {
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Decoded content of page `index`, all content streams concatenated.
    pub(super) fn content(&self, index: usize) -> Result<Vec<u8>, Error> {
        self.document
            .get_page_content(self.page_ids[index])
            .map_err(|e| Error::Pdf(format!("cannot read content of page {}: {e}", index + 1)))
    }

    pub(super) fn resources(&self, index: usize) -> Option<&Object> {
        inherited(&self.document, self.page_ids[index], b"Resources")
    }
}

pub fn load(path: &Path) -> Result<Score, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    let data = unsafe { Mmap::map(&file) }?;
    load_bytes(&data)
}

pub fn load_bytes(data: &[u8]) -> Result<Score, Error> {
    let document = Document::load_mem(data).map_err(|e| Error::InvalidPdf(e.to_string()))?;
    if document.is_encrypted() {
        return Err(Error::InvalidPdf("document is encrypted".into()));
    }

    let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(Error::InvalidPdf("document has no pages".into()));
    }

    let boxes: Vec<[f32; 4]> = page_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| page_box(&document, id, i))
        .collect();
    let units = boxes
        .iter()
        .map(|&[x0, y0, x1, y1]| Unit::new(x0, y1, x1 - x0, y1 - y0))
        .collect();

    Ok(Score {
        document,
        page_ids,
        boxes,
        units,
    })
}

/// Look up a page attribute, following the page tree upwards.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut dict = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        let parent = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
        dict = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn rect(doc: &Document, obj: &Object) -> Option<[f32; 4]> {
    let items = resolve(doc, obj).as_array().ok()?;
    if items.len() != 4 {
        return None;
    }
    let mut v = [0.0f32; 4];
    for (slot, item) in v.iter_mut().zip(items) {
        *slot = match resolve(doc, item) {
            Object::Integer(i) => *i as f32,
            Object::Real(f) => *f,
            _ => return None,
        };
    }
    Some([v[0].min(v[2]), v[1].min(v[3]), v[0].max(v[2]), v[1].max(v[3])])
}

fn page_box(doc: &Document, page_id: ObjectId, index: usize) -> [f32; 4] {
    [&b"CropBox"[..], b"MediaBox"]
        .into_iter()
        .find_map(|key| inherited(doc, page_id, key).and_then(|obj| rect(doc, obj)))
        .unwrap_or_else(|| {
            log::warn!("Page {} has no usable page box, assuming A4", index + 1);
            [0.0, 0.0, A4_WIDTH, A4_HEIGHT]
        })
}
