mod copy;
mod reader;
mod staves;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

use crate::error::Error;
use crate::model::{Element, Layout, OutputPage};

use copy::ObjectCopier;

pub use reader::{Score, load, load_bytes};
pub use staves::{MAX_STAVES, staves_asset};

const SEPARATOR_NAME: &[u8] = b"Staves";

fn deflate(data: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(data, 6)
}

fn unit_name(index: usize) -> String {
    format!("S{}", index + 1)
}

/// Write the laid-out pages as a PDF, embedding the score's pages.
pub fn render(score: &Score, layout: &Layout) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut copier = ObjectCopier::new(&score.document);

    let catalog_id = copier.alloc();
    let pages_id = copier.alloc();

    // Staves: one form XObject shared by every placement.
    let separator = &layout.separator;
    let separator_ref = copier.alloc();
    {
        let drawn = staves::draw(separator);
        let compressed = deflate(drawn.finish().as_slice());
        let mut form = pdf.form_xobject(separator_ref, &compressed);
        form.filter(Filter::FlateDecode);
        form.bbox(Rect::new(
            0.0,
            -staves::LINE_WIDTH,
            separator.width,
            separator.height + staves::LINE_WIDTH,
        ));
    }

    // Systems: every score page becomes a form XObject clipped to its crop box.
    let mut unit_refs: Vec<Ref> = Vec::with_capacity(score.page_count());
    for index in 0..score.page_count() {
        let content = score.content(index)?;
        let compressed = deflate(&content);
        let resources = score.resources(index).map(|r| copier.copy(&mut pdf, r));
        let [x0, y0, x1, y1] = score.boxes[index];

        let form_ref = copier.alloc();
        let mut form = pdf.form_xobject(form_ref, &compressed);
        form.filter(Filter::FlateDecode);
        form.bbox(Rect::new(x0, y0, x1, y1));
        if let Some(resources) = resources {
            form.pair(Name(b"Resources"), resources);
        }
        unit_refs.push(form_ref);
    }
    copier.flush(&mut pdf);
    let t_embed = t0.elapsed();

    let mut page_ids: Vec<Ref> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let page_id = copier.alloc();
        let content_id = copier.alloc();
        let content = page_content(page, layout);
        pdf.stream(content_id, &deflate(content.finish().as_slice()))
            .filter(Filter::FlateDecode);

        let mut out = pdf.page(page_id);
        out.media_box(Rect::new(0.0, 0.0, page.width, page.height))
            .parent(pages_id)
            .contents(content_id);
        {
            let mut resources = out.resources();
            let mut xobjects = resources.x_objects();
            xobjects.pair(Name(SEPARATOR_NAME), separator_ref);
            for placement in &page.placements {
                if let Element::Unit(index) = placement.element {
                    xobjects.pair(Name(unit_name(index).as_bytes()), unit_refs[index]);
                }
            }
        }
        page_ids.push(page_id);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    log::info!(
        "Render phases: embed={:.1}ms, pages={:.1}ms ({} pages)",
        t_embed.as_secs_f64() * 1000.0,
        (t0.elapsed() - t_embed).as_secs_f64() * 1000.0,
        page_ids.len(),
    );

    Ok(pdf.finish())
}

fn page_content(page: &OutputPage, layout: &Layout) -> Content {
    let mut content = Content::new();
    for placement in &page.placements {
        content.save_state();
        match placement.element {
            Element::Unit(index) => {
                let unit = &layout.units[index];
                content.transform([
                    unit.scale,
                    0.0,
                    0.0,
                    unit.scale,
                    placement.x - unit.left,
                    placement.y - unit.bottom(),
                ]);
                content.x_object(Name(unit_name(index).as_bytes()));
            }
            Element::Separator => {
                content.transform([1.0, 0.0, 0.0, 1.0, placement.x, placement.y]);
                content.x_object(Name(SEPARATOR_NAME));
            }
        }
        content.restore_state();
    }
    content
}
