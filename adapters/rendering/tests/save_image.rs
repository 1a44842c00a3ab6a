use std::{fs, path::PathBuf, process};

use galton_board_core::{BoardSettings, SlotCounts, LEFT_HALF_COLOR, RIGHT_HALF_COLOR};
use galton_board_rendering::HistogramCanvas;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("galton-board-{name}-{}", process::id()));
    fs::create_dir_all(&dir).expect("failed to create scratch directory");
    dir
}

fn small_canvas() -> HistogramCanvas {
    let config = BoardSettings {
        board_width: 20,
        board_height: 10,
        peg_radius: 2.0,
        ..BoardSettings::default()
    }
    .validate()
    .expect("test board is valid");
    HistogramCanvas::new(config)
}

#[test]
fn saved_png_matches_the_board_dimensions_and_colors() {
    let dir = scratch_dir("save");
    let path = dir.join("histogram.png");
    let mut canvas = small_canvas();
    let _ = canvas.generate_image(&SlotCounts::from_counts(vec![4; 20]));

    canvas.save_image(&path).expect("saving to a scratch directory succeeds");

    let decoded = image::open(&path)
        .expect("saved file decodes as an image")
        .to_rgb8();
    assert_eq!(decoded.dimensions(), (20, 10));
    assert_eq!(decoded.get_pixel(0, 0).0, LEFT_HALF_COLOR.channels());
    assert_eq!(decoded.get_pixel(19, 9).0, RIGHT_HALF_COLOR.channels());

    fs::remove_dir_all(&dir).expect("failed to clean up scratch directory");
}

#[test]
fn missing_extension_falls_back_to_png() {
    let dir = scratch_dir("no-extension");
    let path = dir.join("histogram");

    small_canvas()
        .save_image(&path)
        .expect("extensionless path is saved as png");

    let bytes = fs::read(&path).expect("saved file is readable");
    assert_eq!(&bytes[..4], b"\x89PNG");

    fs::remove_dir_all(&dir).expect("failed to clean up scratch directory");
}

#[test]
fn unwritable_path_reports_an_error() {
    let path = std::env::temp_dir()
        .join(format!("galton-board-missing-{}", process::id()))
        .join("nested")
        .join("histogram.png");

    let err = small_canvas()
        .save_image(&path)
        .expect_err("saving into a missing directory must fail");

    assert!(
        format!("{err:#}").contains("failed to save histogram image"),
        "unexpected error: {err:#}"
    );
    assert!(!path.exists());
}
