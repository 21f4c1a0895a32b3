use drawing_app::compositor::{encode_png, export_bitmap};
use drawing_app::{Background, StrokePath, StrokeRef};
use egui::{Color32, pos2};
use image::{Rgba, RgbaImage};

fn line(color: Color32, width: f32, from: (f32, f32), to: (f32, f32)) -> StrokeRef {
    StrokePath::new_ref(color, width, vec![pos2(from.0, from.1), pos2(to.0, to.1)]).unwrap()
}

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

#[test]
fn test_later_stroke_wins_at_overlap() {
    let a = line(Color32::RED, 6.0, (0.0, 20.0), (40.0, 20.0));
    let b = line(Color32::BLUE, 6.0, (20.0, 0.0), (20.0, 40.0));

    let ab = export_bitmap(40, 40, None, &[a.clone(), b.clone()]).unwrap();
    assert_eq!(ab.get_pixel(20, 20), &BLUE);
    assert_eq!(ab.get_pixel(5, 20), &RED);

    let ba = export_bitmap(40, 40, None, &[b, a]).unwrap();
    assert_eq!(ba.get_pixel(20, 20), &RED);
}

#[test]
fn test_empty_export_is_white_and_sized() {
    let raster = export_bitmap(17, 9, None, &[]).unwrap();
    assert_eq!(raster.dimensions(), (17, 9));
    assert!(raster.pixels().all(|p| *p == WHITE));
}

#[test]
fn test_background_is_stretched_to_surface() {
    let background = Background::new(RgbaImage::from_pixel(3, 2, RED));
    let raster = export_bitmap(30, 50, Some(&background), &[]).unwrap();
    assert_eq!(raster.dimensions(), (30, 50));
    for (x, y) in [(0, 0), (29, 0), (0, 49), (29, 49), (15, 25)] {
        let Rgba([r, g, b, a]) = *raster.get_pixel(x, y);
        assert!(r > 250 && g < 5 && b < 5 && a == 255, "pixel ({x}, {y}) = {:?}", (r, g, b, a));
    }
}

#[test]
fn test_strokes_drawn_over_background() {
    let background = Background::new(RgbaImage::from_pixel(20, 20, RED));
    let stroke = line(Color32::BLUE, 8.0, (0.0, 10.0), (20.0, 10.0));
    let raster = export_bitmap(20, 20, Some(&background), &[stroke]).unwrap();
    assert_eq!(raster.get_pixel(10, 10), &BLUE);
    assert_eq!(raster.get_pixel(10, 1), &RED);
}

#[test]
fn test_export_is_deterministic() {
    let background = Background::new(RgbaImage::from_fn(7, 5, |x, y| {
        Rgba([(x * 30) as u8, (y * 40) as u8, 90, 255])
    }));
    let strokes = vec![
        line(Color32::RED, 5.0, (3.0, 3.0), (50.0, 41.0)),
        line(Color32::from_rgb(10, 200, 120), 12.0, (60.0, 5.0), (8.0, 44.0)),
        StrokePath::new_ref(Color32::BLACK, 9.0, vec![pos2(33.0, 22.0)]).unwrap(),
    ];

    let first = encode_png(&export_bitmap(64, 48, Some(&background), &strokes).unwrap()).unwrap();
    let second = encode_png(&export_bitmap(64, 48, Some(&background), &strokes).unwrap()).unwrap();
    assert_eq!(first, second);

    let decoded = image::load_from_memory(&first).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}
