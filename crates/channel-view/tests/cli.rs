use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let img = RgbImage::from_fn(160, 120, |x, y| {
        let v = ((x + y) % 200) as u8;
        Rgb([v, v, v])
    });
    img.save_with_format(dir.path().join("Img.bmp"), image::ImageFormat::Bmp)
        .expect("write bmp");
    dir
}

fn channel_view() -> Command {
    Command::cargo_bin("channel-view").expect("binary")
}

#[test]
fn defaults_read_img_bmp_from_working_directory() {
    let dir = fixture_dir();

    channel_view()
        .current_dir(dir.path())
        .args(["--output", "out.png", "--log-level", "off"])
        .assert()
        .success()
        .stdout("Loading image...\nShape of image is (120, 160, 3)\n");

    let out = image::open(dir.path().join("out.png"))
        .expect("rendered png")
        .to_luma8();
    assert_eq!(out.dimensions(), (160, 120));
}

#[test]
fn crop_flags_shape_the_output() {
    let dir = fixture_dir();

    channel_view()
        .current_dir(dir.path())
        .args([
            "--width", "20", "--height", "10", "--channel", "2", "--mapping", "identity",
            "--output", "crop.png",
        ])
        .assert()
        .success();

    let out = image::open(dir.path().join("crop.png"))
        .expect("rendered png")
        .to_luma8();
    assert_eq!(out.dimensions(), (20, 10));
    assert_eq!(out.get_pixel(5, 3)[0], 8);
}

#[test]
fn missing_image_exits_non_zero() {
    let dir = tempfile::tempdir().expect("tempdir");

    channel_view()
        .current_dir(dir.path())
        .args(["--output", "never.png"])
        .assert()
        .failure()
        .stdout("Loading image...\n")
        .stderr(predicate::str::contains("error: failed to open Img.bmp"));

    assert!(!dir.path().join("never.png").exists());
}

#[test]
fn oversized_crop_exits_non_zero() {
    let dir = fixture_dir();

    channel_view()
        .current_dir(dir.path())
        .args(["--width", "161", "--output", "never.png"])
        .assert()
        .failure()
        .stdout("Loading image...\nShape of image is (120, 160, 3)\n")
        .stderr(predicate::str::contains("exceeds image bounds"));

    assert!(!dir.path().join("never.png").exists());
}

#[test]
fn config_file_is_loaded_and_flags_override_it() {
    let dir = fixture_dir();
    std::fs::write(
        dir.path().join("viewer.json"),
        r#"{ "width": 16, "height": 8, "output_path": "from_config.png" }"#,
    )
    .expect("write config");

    channel_view()
        .current_dir(dir.path())
        .args(["--config", "viewer.json", "--height", "4"])
        .assert()
        .success();

    let out = image::open(dir.path().join("from_config.png"))
        .expect("rendered png")
        .to_luma8();
    assert_eq!(out.dimensions(), (16, 4));
}

#[test]
fn half_open_fixed_range_is_rejected_by_clap() {
    channel_view()
        .args(["--vmin", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--vmax"));
}

#[test]
fn log_level_off_silences_stderr() {
    let dir = fixture_dir();

    channel_view()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--width", "4", "--height", "4", "--output", "quiet.png"])
        .args(["--log-level", "off"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn info_level_reports_png_path_without_escape_codes() {
    let dir = fixture_dir();

    channel_view()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--width", "4", "--height", "4", "--output", "noisy.png"])
        .assert()
        .success()
        .stderr(predicate::str::contains("noisy.png"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn unknown_log_level_is_rejected() {
    channel_view()
        .args(["--log-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--log-level"));
}
