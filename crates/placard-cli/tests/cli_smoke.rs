//! CLI Smoke Tests
//!
//! Run the built `placard` binary against generated pictures.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use image::{Rgba, RgbaImage};

fn placard() -> Command {
    Command::new(env!("CARGO_BIN_EXE_placard"))
}

fn profiles_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/profiles.json")
}

fn write_base(dir: &Path) -> PathBuf {
    let path = dir.join("base.png");
    RgbaImage::from_pixel(400, 200, Rgba([30, 30, 60, 255]))
        .save(&path)
        .unwrap();
    path
}

fn run(command: &mut Command) -> Output {
    command.output().unwrap()
}

fn png_size(path: &Path) -> (u32, u32) {
    let image = image::open(path).unwrap();
    (image.width(), image.height())
}

#[test]
fn test_help_lists_subcommands() {
    let output = run(placard().arg("--help"));
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["text", "image", "base", "info"] {
        assert!(stdout.contains(command), "help should mention {command}");
    }
}

#[test]
fn test_info_lists_bundled_characters() {
    let output = run(placard().arg("info").arg("--profiles").arg(profiles_path()));
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("yuki"));
    assert!(stdout.contains("288 bases"));
    assert!(stdout.contains("728,355"));
}

#[test]
fn test_text_with_missing_font_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_base(dir.path());
    let out = dir.path().join("card.png");

    let output = run(placard()
        .args(["-q", "text", "hello [there]", "--base"])
        .arg(&base)
        .args(["--rect", "20,20,380,180", "--font", "/no/such/font.ttf", "-o"])
        .arg(&out));
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(png_size(&out), (280, 140));
}

#[test]
fn test_text_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_base(dir.path());
    let out = dir.path().join("stdin.png");

    let mut child = placard()
        .args(["-q", "text", "--rect", "0,0,400,200", "--base"])
        .arg(&base)
        .arg("-o")
        .arg(&out)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all("你好\n世界\n".as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(out.is_file());
}

#[test]
fn test_image_when_padding_too_large_then_fails() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_base(dir.path());
    let photo = dir.path().join("photo.png");
    RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 255]))
        .save(&photo)
        .unwrap();

    let output = run(placard()
        .arg("image")
        .arg(&photo)
        .arg("--base")
        .arg(&base)
        .args(["--rect", "0,0,100,100", "--padding", "60", "-o"])
        .arg(dir.path().join("never.png")));
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
    assert!(!dir.path().join("never.png").exists());
}

#[test]
fn test_image_with_profile_template_rect() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("template.png");
    RgbaImage::from_pixel(2560, 834, Rgba([0, 0, 0, 255]))
        .save(&base)
        .unwrap();
    let photo = dir.path().join("photo.png");
    RgbaImage::from_pixel(40, 40, Rgba([0, 255, 0, 255]))
        .save(&photo)
        .unwrap();
    let out = dir.path().join("card.png");

    let output = run(placard()
        .args(["-q", "image"])
        .arg(&photo)
        .arg("--base")
        .arg(&base)
        .arg("--profiles")
        .arg(profiles_path())
        .args(["--no-labels", "-o"])
        .arg(&out));
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(png_size(&out), (1200, 390));
}

#[test]
fn test_base_composes_portrait() {
    let dir = tempfile::tempdir().unwrap();
    let background = dir.path().join("c1.png");
    RgbaImage::from_pixel(100, 300, Rgba([0, 0, 255, 255]))
        .save(&background)
        .unwrap();
    let portrait = dir.path().join("ema (1).png");
    RgbaImage::from_pixel(10, 10, Rgba([255, 255, 0, 255]))
        .save(&portrait)
        .unwrap();
    let out = dir.path().join("ema (1).png.out.png");

    let output = run(placard()
        .args(["-q", "base", "--background"])
        .arg(&background)
        .arg("--portrait")
        .arg(&portrait)
        .arg("-o")
        .arg(&out));
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let base = image::open(&out).unwrap().to_rgba8();
    assert_eq!(base.get_pixel(5, 139), &Rgba([255, 255, 0, 255]));
    assert_eq!(base.get_pixel(5, 5), &Rgba([0, 0, 255, 255]));
}

#[test]
fn test_text_on_random_base_of_expression() {
    let dir = tempfile::tempdir().unwrap();
    let bases = dir.path().join("bases");
    std::fs::create_dir(&bases).unwrap();
    // Only expression 2 exists on disk, so any other pick would fail to load
    for number in 17..=32 {
        image::RgbImage::from_pixel(400, 200, image::Rgb([40, 40, 40]))
            .save(bases.join(format!("ema ({number}).jpg")))
            .unwrap();
    }
    let out = dir.path().join("random.png");

    let output = run(placard()
        .args(["-q", "text", "hi [there]", "--profiles"])
        .arg(profiles_path())
        .args(["--character", "ema", "--bases-dir"])
        .arg(&bases)
        .args(["--expression", "2", "--rect", "20,20,380,180", "-o"])
        .arg(&out));
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(png_size(&out), (280, 140));
}
