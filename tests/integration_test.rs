//! End-to-end tests: batch extraction followed by lesson linking

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};
use tempfile::TempDir;

use illustkit::lessons::{link_lesson_file, read_lesson, LinkOutcome};
use illustkit::{
    discover_pages, BatchDriver, IllustError, IllustResult, IllustrationExtractor, Rasterizer,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn page_with_blobs(blobs: &[(u32, u32, u32, u32)]) -> DynamicImage {
    let mut page = RgbImage::from_pixel(600, 800, Rgb([250, 250, 250]));
    for &(x0, y0, w, h) in blobs {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                page.put_pixel(x, y, Rgb([30, 30, 30]));
            }
        }
    }
    DynamicImage::ImageRgb8(page)
}

/// What the fake converter does for a page
enum FakePage {
    Image(DynamicImage),
    Corrupt,
    Nothing,
    Fail,
}

/// Stands in for the external converter, keyed by page document name
struct FakeRasterizer {
    pages: Vec<(&'static str, FakePage)>,
    scratch_dirs: RefCell<Vec<PathBuf>>,
}

impl Rasterizer for FakeRasterizer {
    fn rasterize(&self, document: &Path, scratch_dir: &Path) -> IllustResult<Option<PathBuf>> {
        self.scratch_dirs.borrow_mut().push(scratch_dir.to_path_buf());

        let name = document.file_name().unwrap().to_str().unwrap();
        let (_, page) = self.pages.iter().find(|(n, _)| *n == name).unwrap();
        let output = scratch_dir.join("page-1.png");

        match page {
            FakePage::Image(image) => {
                image.save(&output).unwrap();
                Ok(Some(output))
            }
            FakePage::Corrupt => {
                fs::write(&output, b"truncated").unwrap();
                Ok(Some(output))
            }
            FakePage::Nothing => Ok(None),
            FakePage::Fail => Err(IllustError::RasterizeError("exit status: 1".to_string())),
        }
    }
}

#[test]
fn test_batch_extraction_and_linking() {
    init_logging();
    let sources = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let lessons = TempDir::new().unwrap();

    let rasterizer = FakeRasterizer {
        pages: vec![
            ("part-1.pdf", FakePage::Image(page_with_blobs(&[(300, 500, 150, 120), (50, 100, 200, 100)]))),
            ("part-2.pdf", FakePage::Fail),
            ("part-3.pdf", FakePage::Nothing),
            ("part-4.pdf", FakePage::Corrupt),
            ("part-10.pdf", FakePage::Image(page_with_blobs(&[(100, 100, 300, 200)]))),
        ],
        scratch_dirs: RefCell::new(Vec::new()),
    };
    for (name, _) in &rasterizer.pages {
        fs::write(sources.path().join(name), b"%PDF").unwrap();
    }

    let pages = discover_pages(sources.path(), r"^part-(\d+)\.pdf$").unwrap();
    let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 10]);

    let driver = BatchDriver::new(rasterizer, IllustrationExtractor::default(), output.path());
    let summary = driver.run(&pages).unwrap();

    assert_eq!(summary.skipped, vec![2, 3]);
    assert_eq!(summary.counts.get(&1), Some(&2));
    assert_eq!(summary.counts.get(&4), Some(&0));
    assert_eq!(summary.counts.get(&10), Some(&1));
    assert_eq!(summary.total(), 3);

    let mut written: Vec<String> = fs::read_dir(output.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    written.sort();
    assert_eq!(written, vec!["page10_illust001.png", "page1_illust001.png", "page1_illust002.png"]);

    // the upper blob on page 1 is rank 1
    let first = image::open(output.path().join("page1_illust001.png")).unwrap();
    assert_eq!((first.width(), first.height()), (210, 110));

    // lesson 1 has two illustrations, lesson 10 only one
    let lesson_1 = lessons.path().join("lesson_1.json");
    fs::write(&lesson_1, r#"{"id": 1, "type": "dialogue", "dialogue": {"lines": [], "images": []}}"#).unwrap();
    let lesson_10 = lessons.path().join("lesson_10.json");
    fs::write(&lesson_10, r#"{"id": 10, "type": "dialogue", "dialogue": {"lines": [], "images": []}}"#).unwrap();

    assert_eq!(link_lesson_file(&lesson_1, output.path(), "/illustrations-sorted").unwrap(), LinkOutcome::Images(2));
    assert_eq!(link_lesson_file(&lesson_10, output.path(), "/illustrations-sorted").unwrap(), LinkOutcome::Header);

    let linked = read_lesson(&lesson_1).unwrap();
    assert_eq!(linked["dialogue"]["images"][0]["src"], "/illustrations-sorted/page1_illust001.png");
    assert_eq!(linked["dialogue"]["images"][1]["src"], "/illustrations-sorted/page1_illust002.png");
    let linked = read_lesson(&lesson_10).unwrap();
    assert_eq!(linked["dialogue"]["headerImage"]["src"], "/illustrations-sorted/page10_illust001.png");
}

#[test]
fn test_scratch_directories_removed() {
    init_logging();
    let sources = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(sources.path().join("part-1.pdf"), b"%PDF").unwrap();
    fs::write(sources.path().join("part-2.pdf"), b"%PDF").unwrap();

    let rasterizer = FakeRasterizer {
        pages: vec![
            ("part-1.pdf", FakePage::Image(page_with_blobs(&[(100, 100, 120, 120)]))),
            ("part-2.pdf", FakePage::Fail),
        ],
        scratch_dirs: RefCell::new(Vec::new()),
    };
    let pages = discover_pages(sources.path(), r"^part-(\d+)\.pdf$").unwrap();

    let driver = BatchDriver::new(&rasterizer, IllustrationExtractor::default(), output.path());
    driver.run(&pages).unwrap();

    let scratch_dirs = rasterizer.scratch_dirs.borrow();
    assert_eq!(scratch_dirs.len(), 2);
    assert_ne!(scratch_dirs[0], scratch_dirs[1]);
    for dir in scratch_dirs.iter() {
        assert!(!dir.exists(), "{} was not cleaned up", dir.display());
    }
}

#[test]
fn test_unwritable_output_fails_only_that_page() {
    init_logging();
    let sources = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(sources.path().join("part-1.pdf"), b"%PDF").unwrap();
    fs::write(sources.path().join("part-2.pdf"), b"%PDF").unwrap();

    // a directory squatting on page 1's output name makes the PNG write fail
    fs::create_dir(output.path().join("page1_illust001.png")).unwrap();

    let rasterizer = FakeRasterizer {
        pages: vec![
            ("part-1.pdf", FakePage::Image(page_with_blobs(&[(100, 100, 150, 120)]))),
            ("part-2.pdf", FakePage::Image(page_with_blobs(&[(100, 100, 150, 120)]))),
        ],
        scratch_dirs: RefCell::new(Vec::new()),
    };
    let pages = discover_pages(sources.path(), r"^part-(\d+)\.pdf$").unwrap();

    let driver = BatchDriver::new(rasterizer, IllustrationExtractor::default(), output.path());
    let summary = driver.run(&pages).unwrap();

    assert_eq!(summary.failed, vec![1]);
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.counts.get(&2), Some(&1));
    assert!(!summary.counts.contains_key(&1));
    assert!(output.path().join("page2_illust001.png").is_file());
}
