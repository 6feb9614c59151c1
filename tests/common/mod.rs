use std::fs;
use std::path::PathBuf;

use add_staves::LayoutConfig;
use add_staves::model::Unit;
use pdf_writer::{Content, Name, Pdf, Rect, Ref};

/// Layout used by most tests: 30/30 margins, 30/10 paddings, 50pt staves.
#[allow(dead_code)]
pub fn config() -> LayoutConfig {
    LayoutConfig::default().with_separator_height(50.0)
}

#[allow(dead_code)]
pub fn units(heights: &[f32]) -> Vec<Unit> {
    heights.iter().map(|&h| Unit::sized(500.0, h)).collect()
}

#[allow(dead_code)]
pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Output path under tests/output/, created on demand.
#[allow(dead_code)]
pub fn output_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output");
    fs::create_dir_all(&dir).ok();
    dir.join(name)
}

#[allow(dead_code)]
/// A score with one page per `(width, height)`, each page filled with a
/// grey rectangle that uses a shared ExtGState resource.
pub fn make_score(sizes: &[(f32, f32)]) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let gs_id = Ref::new(3);
    let mut next = 4;

    pdf.ext_graphics(gs_id).non_stroking_alpha(0.5);

    let mut page_ids = Vec::new();
    for &(width, height) in sizes {
        let page_id = Ref::new(next);
        let content_id = Ref::new(next + 1);
        next += 2;

        let mut content = Content::new();
        content.set_parameters(Name(b"G0"));
        content.set_fill_gray(0.5);
        content.rect(0.0, 0.0, width, height);
        content.fill_nonzero();
        pdf.stream(content_id, content.finish().as_slice());

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width, height))
            .parent(pages_id)
            .contents(content_id);
        page.resources().ext_g_states().pair(Name(b"G0"), gs_id);
        drop(page);
        page_ids.push(page_id);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.finish()
}
