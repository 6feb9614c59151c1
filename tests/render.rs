mod common;

use std::path::Path;

use add_staves::{Error, LayoutConfig, Options, add_staves, add_staves_bytes, load_bytes};
use lopdf::{Document, Object, Stream, dictionary};

use common::{make_score, output_path};

fn media_box(doc: &Document, page: lopdf::ObjectId) -> Vec<f32> {
    let dict = doc.get_dictionary(page).unwrap();
    dict.get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| match v {
            Object::Integer(i) => *i as f32,
            Object::Real(f) => *f,
            other => panic!("unexpected {other:?}"),
        })
        .collect()
}

fn xobject_names(doc: &Document, page: lopdf::ObjectId) -> Vec<String> {
    let dict = doc.get_dictionary(page).unwrap();
    let resources = dict.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let mut names: Vec<String> = xobjects
        .iter()
        .map(|(k, _)| String::from_utf8_lossy(k).into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn reads_systems_from_page_boxes() {
    let score = load_bytes(&make_score(&[(500.0, 120.0), (480.0, 200.0)])).unwrap();
    assert_eq!(score.page_count(), 2);
    assert_eq!(score.units[0].width, 500.0);
    assert_eq!(score.units[0].height, 120.0);
    assert_eq!(score.units[1].top, 200.0);
}

#[test]
fn rejects_garbage_input() {
    assert!(matches!(load_bytes(b"not a pdf"), Err(Error::InvalidPdf(_))));
}

#[test]
fn missing_input_reports_the_path() {
    let err = add_staves(
        Path::new("tests/does-not-exist.pdf"),
        &output_path("missing.pdf"),
        &Options::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("does-not-exist.pdf"));
}

#[test]
fn packs_score_onto_a4_pages() {
    let _ = env_logger::builder().is_test(true).try_init();
    let sizes = vec![(500.0, 150.0); 7];
    let output = output_path("packed.pdf");
    add_staves_bytes(&make_score(&sizes), &output, &Options::default()).unwrap();

    let doc = Document::load(&output).unwrap();
    let pages: Vec<_> = doc.get_pages().into_values().collect();
    // 60 + 3 * (150 + 92 + 40) = 906 > 842: two systems per page
    assert_eq!(pages.len(), 4);
    for &page in &pages {
        let mb = media_box(&doc, page);
        assert_eq!(mb[2] - mb[0], 595.0);
        assert!(mb[3] - mb[1] >= 842.0);
    }
    assert_eq!(xobject_names(&doc, pages[0]), vec!["S1", "S2", "Staves"]);
    assert_eq!(xobject_names(&doc, pages[3]), vec!["S7", "Staves"]);
}

#[test]
fn combining_text_controls_pages() {
    let sizes = vec![(500.0, 100.0); 9];
    let output = output_path("combined.pdf");
    let options = Options {
        combining: Some("4 5".into()),
        ..Options::default()
    };
    add_staves_bytes(&make_score(&sizes), &output, &options).unwrap();

    let doc = Document::load(&output).unwrap();
    let pages: Vec<_> = doc.get_pages().into_values().collect();
    assert_eq!(pages.len(), 2);
    assert_eq!(xobject_names(&doc, pages[1]).len(), 6);
    // 5 * (100 + 132) + 60 = 1220: the second page grows past A4.
    let mb = media_box(&doc, pages[1]);
    assert!((mb[3] - 1220.0).abs() < 0.01);
}

#[test]
fn embedded_systems_keep_their_resources() {
    let output = output_path("resources.pdf");
    add_staves_bytes(
        &make_score(&[(500.0, 100.0)]),
        &output,
        &Options::default(),
    )
    .unwrap();

    let doc = Document::load(&output).unwrap();
    let page = doc.get_pages().into_values().next().unwrap();
    let resources = doc
        .get_dictionary(page)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let form_id = xobjects.get(b"S1").unwrap().as_reference().unwrap();
    let Object::Stream(form) = doc.get_object(form_id).unwrap() else {
        panic!("system is not a stream");
    };
    assert_eq!(form.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Form");

    let form_resources = doc
        .get_dictionary(form.dict.get(b"Resources").unwrap().as_reference().unwrap())
        .unwrap();
    let gs = form_resources.get(b"ExtGState").unwrap().as_dict().unwrap();
    let gs_id = gs.get(b"G0").unwrap().as_reference().unwrap();
    assert!(doc.get_dictionary(gs_id).unwrap().get(b"ca").is_ok());
}

#[test]
fn zero_staves_and_custom_margins() {
    let output = output_path("no-staves.pdf");
    let options = Options {
        staves: 0,
        layout: LayoutConfig {
            top_margin: 50.0,
            ragged_bottom: true,
            ..LayoutConfig::default()
        },
        ..Options::default()
    };
    add_staves_bytes(&make_score(&[(700.0, 300.0); 3]), &output, &options).unwrap();
    let doc = Document::load(&output).unwrap();
    assert!(!doc.get_pages().is_empty());
}

#[test]
fn too_many_staves_is_an_error() {
    let options = Options {
        staves: 7,
        ..Options::default()
    };
    let err = add_staves_bytes(
        &make_score(&[(500.0, 100.0)]),
        &output_path("invalid.pdf"),
        &options,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidStaffCount(7)));
}

/// Single-page score whose ExtGState carries an integer beyond 32 bits.
fn score_with_large_integer() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let gs_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "Big" => Object::Integer(5_000_000_000),
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, b"0 0 100 100 re f".to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(500),
            Object::Integer(100),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "ExtGState" => dictionary! { "G0" => gs_id },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn large_integers_survive_copying() {
    let output = output_path("large-integer.pdf");
    add_staves_bytes(&score_with_large_integer(), &output, &Options::default()).unwrap();

    let doc = Document::load(&output).unwrap();
    let gs = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .find(|dict| dict.get(b"Big").is_ok())
        .expect("copied ExtGState");
    let big = match gs.get(b"Big").unwrap() {
        Object::Integer(i) => *i as f64,
        Object::Real(f) => *f as f64,
        other => panic!("unexpected {other:?}"),
    };
    assert!((big - 5.0e9).abs() / 5.0e9 < 1e-3, "got {big}");
}
