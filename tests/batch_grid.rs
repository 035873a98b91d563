use image::{Rgba, RgbaImage};
use qrstyle::color::Color;
use qrstyle::geometry::Region;
use qrstyle::helper::generate_batch_png;
use qrstyle::{render_batch, BatchEntry, BatchRequest, Compositor, Error, QrcodeProvider, StyleSpec};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tinted_style() -> StyleSpec {
    StyleSpec::default().with_colors(Color::rgb(0x1E, 0x40, 0xAF), Color::rgb(0xDB, 0xEA, 0xFE))
}

fn entries(count: usize) -> Vec<BatchEntry> {
    (0..count)
        .map(|i| BatchEntry::new(format!("https://example.com/item/{i}"), ""))
        .collect()
}

fn region_is(canvas: &RgbaImage, region: Region, color: Rgba<u8>) -> bool {
    (region.y..region.bottom()).all(|y| (region.x..region.right()).all(|x| *canvas.get_pixel(x, y) == color))
}

fn region_contains(canvas: &RgbaImage, region: Region, color: Rgba<u8>) -> bool {
    (region.y..region.bottom()).any(|y| (region.x..region.right()).any(|x| *canvas.get_pixel(x, y) == color))
}

#[test]
fn five_entries_use_a_three_by_three_grid() {
    init_logging();
    let compositor = Compositor::default();
    let style = tinted_style();
    let request = BatchRequest::new(entries(5), style.clone());
    let canvas = compositor.compose_batch(&request, &QrcodeProvider).unwrap();

    let layout = compositor.batch_layout(5, false).unwrap();
    assert_eq!(layout.grid_size, 3);
    assert_eq!(canvas.dimensions(), (layout.canvas_side, layout.canvas_side));

    for index in 0..5 {
        let cell = layout.cell(index);
        assert!(region_contains(&canvas, cell, style.background.to_rgba()), "cell {index}");
        assert!(region_contains(&canvas, cell, style.foreground.to_rgba()), "cell {index}");
    }
    for index in 5..9 {
        assert!(region_is(&canvas, layout.cell(index), WHITE), "trailing cell {index} should be blank");
    }
}

#[test]
fn nine_entries_fill_the_grid() {
    let compositor = Compositor::default();
    let style = tinted_style();
    let request = BatchRequest::new(entries(9), style.clone());
    let canvas = compositor.compose_batch(&request, &QrcodeProvider).unwrap();

    let layout = compositor.batch_layout(9, false).unwrap();
    assert_eq!(layout.grid_size, 3);
    for index in 0..9 {
        let cell = layout.cell(index);
        // Cell corner is background; the symbol's top-left finder module is foreground.
        assert_eq!(*canvas.get_pixel(cell.x, cell.y), style.background.to_rgba());
        assert_eq!(*canvas.get_pixel(cell.x + 20, cell.y + 20), style.foreground.to_rgba());
    }
}

#[test]
fn blank_batch_is_rejected() {
    let request = BatchRequest::new(vec![BatchEntry::new("  ", "label only")], StyleSpec::default());
    assert!(matches!(render_batch(&request, &QrcodeProvider), Err(Error::EmptyBatch)));
    let request = BatchRequest::new(Vec::new(), StyleSpec::default());
    assert!(matches!(render_batch(&request, &QrcodeProvider), Err(Error::EmptyBatch)));
}

#[test]
fn blank_entries_do_not_take_cells() {
    let mut list = entries(4);
    list.insert(1, BatchEntry::new("", "skipped"));
    list.push(BatchEntry::new("\t", ""));
    let request = BatchRequest::new(list, StyleSpec::default());
    let raster = render_batch(&request, &QrcodeProvider).unwrap();
    // Four real entries form a 2x2 grid.
    assert_eq!(raster.width, 2 * 220);
}

#[test]
fn labels_sit_under_their_cells() {
    let compositor = Compositor::default();
    let style = StyleSpec::default().with_colors(Color::rgb(0x16, 0x65, 0x34), Color::rgb(0xDC, 0xFC, 0xE7));
    let request = BatchRequest::new(
        vec![BatchEntry::new("https://a.example", "Alpha"), BatchEntry::new("https://b.example", "")],
        style.clone(),
    );
    let canvas = compositor.compose_batch(&request, &QrcodeProvider).unwrap();
    let layout = compositor.batch_layout(2, true).unwrap();
    assert_eq!(canvas.width(), layout.canvas_side);

    let first = layout.cell(0);
    let band = Region::new(first.x, first.bottom(), first.side);
    assert!(region_contains(&canvas, band, style.foreground.to_rgba()));

    let second = layout.cell(1);
    let empty_band = Region::new(second.x, second.bottom(), second.side);
    assert!(!region_contains(&canvas, empty_band, style.foreground.to_rgba()));
}

#[test]
fn batch_png_is_square_and_stable() {
    let pairs = [("https://a.example", "A"), ("https://b.example", "B"), ("https://c.example", "C")];
    let first = generate_batch_png(&pairs, &tinted_style()).unwrap();
    let second = generate_batch_png(&pairs, &tinted_style()).unwrap();
    assert_eq!(first.width, first.height);
    assert_eq!(first.png_data, second.png_data);
}
