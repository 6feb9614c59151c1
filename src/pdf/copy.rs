use std::collections::HashMap;

use lopdf::{Document, Object, ObjectId};
use pdf_writer::{Dict, Name, Null, Obj, Pdf, Ref, Str};

/// Transplants objects of a parsed score into the output document.
///
/// Object ids of the output are handed out here as well, so the score's
/// objects and the ones written by the renderer never collide.
pub(super) struct ObjectCopier<'a> {
    source: &'a Document,
    next_id: i32,
    mapped: HashMap<ObjectId, Ref>,
    pending: Vec<ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub(super) fn new(source: &'a Document) -> Self {
        Self {
            source,
            next_id: 1,
            mapped: HashMap::new(),
            pending: Vec::new(),
        }
    }

    pub(super) fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    /// Output reference for a source object; the object itself is written on
    /// the next [`flush`](Self::flush).
    fn reference(&mut self, id: ObjectId) -> Ref {
        if let Some(&r) = self.mapped.get(&id) {
            return r;
        }
        let r = self.alloc();
        self.mapped.insert(id, r);
        self.pending.push(id);
        r
    }

    /// Write `value` as an indirect object of its own (or reuse the mapped
    /// object when it already is a reference).
    pub(super) fn copy(&mut self, pdf: &mut Pdf, value: &Object) -> Ref {
        if let Object::Reference(id) = value {
            return self.reference(*id);
        }
        let r = self.alloc();
        self.write_value(pdf.indirect(r), value);
        r
    }

    /// Write every object reachable from what has been copied so far.
    pub(super) fn flush(&mut self, pdf: &mut Pdf) {
        let source = self.source;
        while let Some(id) = self.pending.pop() {
            let r = self.mapped[&id];
            match source.get_object(id) {
                Ok(Object::Stream(stream)) => {
                    let mut out = pdf.stream(r, &stream.content);
                    for (key, value) in stream.dict.iter() {
                        if key.as_slice() == b"Length" {
                            continue;
                        }
                        self.write_value(out.insert(Name(key)), value);
                    }
                }
                Ok(value) => self.write_value(pdf.indirect(r), value),
                Err(e) => {
                    log::warn!("Missing object {} {} in score: {e}", id.0, id.1);
                    pdf.indirect(r).primitive(Null);
                }
            }
        }
    }

    fn write_value(&mut self, obj: Obj<'_>, value: &Object) {
        match value {
            Object::Null => obj.primitive(Null),
            Object::Boolean(b) => obj.primitive(*b),
            Object::Integer(i) => match i32::try_from(*i) {
                Ok(i) => obj.primitive(i),
                Err(_) => {
                    log::warn!("Integer {i} does not fit in 32 bits, writing it as a real");
                    obj.primitive(*i as f32);
                }
            },
            Object::Real(f) => obj.primitive(*f),
            Object::Name(name) => obj.primitive(Name(name)),
            Object::String(bytes, _) => obj.primitive(Str(bytes)),
            Object::Array(items) => {
                let mut array = obj.array();
                for item in items {
                    self.write_value(array.push(), item);
                }
            }
            Object::Dictionary(dict) => {
                let mut out = obj.dict();
                self.write_dict(&mut out, dict);
            }
            Object::Stream(_) => {
                // Streams are always indirect; a direct one is malformed.
                log::warn!("Dropping direct stream object in score");
                obj.primitive(Null);
            }
            Object::Reference(id) => {
                let r = self.reference(*id);
                obj.primitive(r);
            }
        }
    }

    fn write_dict(&mut self, out: &mut Dict<'_>, dict: &lopdf::Dictionary) {
        for (key, value) in dict.iter() {
            self.write_value(out.insert(Name(key)), value);
        }
    }
}
