#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::capture::CapturedRegion;
    use rgb::RGBA8;

    fn region_from(raster: RasterBuffer) -> CapturedRegion {
        CapturedRegion {
            raster,
            normalized_width: 0.5,
            normalized_height: 0.5,
        }
    }

    fn solid_session(width: u32, height: u32, color: RGBA8) -> EditSession {
        let pixels = vec![color; (width * height) as usize];
        let raster = RasterBuffer::from_pixels(width, height, pixels).unwrap();
        EditSession::new(region_from(raster), EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_brush_radius_rejected() {
        let raster = RasterBuffer::new(4, 4).unwrap();
        let config = EditorConfig {
            brush_radius: 0.0,
            ..EditorConfig::default()
        };
        assert!(EditSession::new(region_from(raster), config).is_err());
    }

    #[test]
    fn test_erase_clears_circle_only() {
        let mut session = solid_session(20, 20, RGBA8::new(0, 0, 0, 255));
        session.erase(Point::new(10.0, 10.0), 3.0);
        assert_eq!(session.raster().get(10, 10).a, 0);
        assert_eq!(session.raster().get(10, 12).a, 0);
        // Corner of the bounding square is outside the circle.
        assert_eq!(session.raster().get(7, 7).a, 255);
        assert_eq!(session.raster().get(0, 0).a, 255);
    }

    #[test]
    fn test_erase_clamps_to_bounds() {
        let mut session = solid_session(10, 10, RGBA8::new(0, 0, 0, 255));
        // Brush centered outside the buffer; must not panic.
        session.erase(Point::new(-2.0, -2.0), 5.0);
        assert_eq!(session.raster().get(0, 0).a, 0);
        assert_eq!(session.raster().get(9, 9).a, 255);
    }

    #[test]
    fn test_restore_undoes_local_erase() {
        let mut session = solid_session(20, 20, RGBA8::new(50, 60, 70, 255));
        session.erase(Point::new(10.0, 10.0), 4.0);
        assert_eq!(session.raster().get(10, 10).a, 0);
        session.restore(Point::new(10.0, 10.0), 4.0);
        assert_eq!(session.raster().get(10, 10), RGBA8::new(50, 60, 70, 255));
    }

    #[test]
    fn test_fill_paints_opaque_color() {
        let mut session = solid_session(20, 20, RGBA8::new(255, 255, 255, 0));
        session.fill(Point::new(5.0, 5.0), 2.0, Color::new(200, 10, 20));
        assert_eq!(session.raster().get(5, 5), RGBA8::new(200, 10, 20, 255));
        assert_eq!(session.raster().get(15, 15).a, 0);
    }

    #[test]
    fn test_stroke_state_machine() {
        let mut session = solid_session(20, 20, RGBA8::new(0, 0, 0, 255));
        // Idle: apply is a no-op.
        session.apply(Point::new(10.0, 10.0));
        assert_eq!(session.raster().get(10, 10).a, 255);

        session.begin_stroke(BrushTool::Erase);
        assert!(session.is_dragging());
        session.apply(Point::new(10.0, 10.0));
        assert_eq!(session.raster().get(10, 10).a, 0);

        session.end_stroke();
        assert!(!session.is_dragging());
        session.apply(Point::new(3.0, 3.0));
        assert_eq!(session.raster().get(3, 3).a, 255);
    }

    #[test]
    fn test_cancel_stroke_keeps_applied_subops() {
        let mut session = solid_session(20, 20, RGBA8::new(0, 0, 0, 255));
        session.begin_stroke(BrushTool::Erase);
        session.apply(Point::new(5.0, 5.0));
        session.cancel_stroke();
        assert!(!session.is_dragging());
        // In-place brush edits are not transactional.
        assert_eq!(session.raster().get(5, 5).a, 0);
    }

    #[test]
    fn test_remove_background_strips_near_white() {
        let pixels = vec![
            RGBA8::new(250, 250, 250, 255),
            RGBA8::new(250, 100, 250, 255),
            RGBA8::new(241, 241, 241, 255),
            RGBA8::new(240, 240, 240, 255),
        ];
        let raster = RasterBuffer::from_pixels(4, 1, pixels).unwrap();
        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();
        session.remove_background(240);
        assert_eq!(session.raster().get(0, 0).a, 0);
        assert_eq!(session.raster().get(1, 0).a, 255); // one dark channel keeps it
        assert_eq!(session.raster().get(2, 0).a, 0);
        assert_eq!(session.raster().get(3, 0).a, 255); // exactly at tolerance stays
    }

    #[test]
    fn test_threshold_binarizes() {
        let pixels = vec![
            RGBA8::new(210, 210, 210, 255),
            RGBA8::new(50, 50, 50, 255),
        ];
        let raster = RasterBuffer::from_pixels(2, 1, pixels).unwrap();
        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();
        session.threshold(200);
        assert_eq!(session.raster().get(0, 0).a, 0);
        assert_eq!(session.raster().get(1, 0), RGBA8::new(0, 0, 0, 255));
    }

    #[test]
    fn test_remove_specks_drops_small_blobs() {
        let mut raster = RasterBuffer::new(50, 50).unwrap();
        // 10x10 blob.
        for y in 5..15 {
            for x in 5..15 {
                raster.set(x, y, RGBA8::new(0, 0, 0, 255));
            }
        }
        // 2-pixel speck, isolated.
        raster.set(40, 40, RGBA8::new(0, 0, 0, 255));
        raster.set(41, 40, RGBA8::new(0, 0, 0, 255));

        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();
        session.remove_specks(5);

        assert_eq!(session.raster().get(40, 40).a, 0);
        assert_eq!(session.raster().get(41, 40).a, 0);
        assert_eq!(session.raster().get(10, 10).a, 255);
    }

    #[test]
    fn test_remove_specks_monotonic() {
        let mut raster = RasterBuffer::new(30, 30).unwrap();
        for (x, y, span) in [(2u32, 2u32, 3u32), (10, 10, 2), (20, 20, 5)] {
            for dy in 0..span {
                for dx in 0..span {
                    raster.set(x + dx, y + dy, RGBA8::new(0, 0, 0, 255));
                }
            }
        }

        let count_opaque = |s: &EditSession| {
            s.raster().pixels().iter().filter(|p| p.a > 0).count()
        };

        let mut previous = usize::MAX;
        for min_size in [1usize, 5, 10, 30] {
            let mut session = EditSession::new(
                region_from(raster.clone()),
                EditorConfig::default(),
            )
            .unwrap();
            let before = count_opaque(&session);
            session.remove_specks(min_size);
            let after = count_opaque(&session);
            assert!(after <= before);
            assert!(after <= previous, "opaque count must not grow with min_size");
            previous = after;
        }
    }

    #[test]
    fn test_recolor_masks_background_and_scales_alpha() {
        let pixels = vec![
            RGBA8::new(0, 0, 0, 255),       // full ink
            RGBA8::new(100, 100, 100, 255), // mid ink
            RGBA8::new(220, 220, 220, 255), // near-white
            RGBA8::new(0, 0, 0, 5),         // below alpha floor, untouched
        ];
        let raster = RasterBuffer::from_pixels(4, 1, pixels).unwrap();
        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();
        let red = Color::new(255, 0, 0);
        session.recolor(red);

        let full = session.raster().get(0, 0);
        assert_eq!((full.r, full.g, full.b, full.a), (255, 0, 0, 255));

        let mid = session.raster().get(1, 0);
        // darkness = 1 - 100/200 = 0.5
        assert_eq!((mid.r, mid.g, mid.b, mid.a), (255, 0, 0, 128));

        assert_eq!(session.raster().get(2, 0).a, 0);
        assert_eq!(session.raster().get(3, 0), RGBA8::new(0, 0, 0, 5));
    }

    #[test]
    fn test_invert_is_involution_on_opaque_rgb() {
        let pixels = vec![
            RGBA8::new(10, 120, 250, 255),
            RGBA8::new(0, 0, 0, 128),
            RGBA8::new(77, 88, 99, 0), // invisible, untouched
        ];
        let raster = RasterBuffer::from_pixels(3, 1, pixels.clone()).unwrap();
        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();
        session.invert();
        assert_eq!(session.raster().get(0, 0), RGBA8::new(245, 135, 5, 255));
        session.invert();
        for (i, expected) in pixels.iter().enumerate() {
            assert_eq!(session.raster().get(i as u32, 0), *expected);
        }
    }

    #[test]
    fn test_trim_crops_and_rescales_normalized_dims() {
        let mut raster = RasterBuffer::new(40, 20).unwrap();
        for y in 5..10 {
            for x in 10..30 {
                raster.set(x, y, RGBA8::new(0, 0, 0, 255));
            }
        }
        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();
        session.trim();

        assert_eq!(session.raster().width(), 20);
        assert_eq!(session.raster().height(), 5);
        // 0.5 * 20/40 and 0.5 * 5/20
        assert!((session.normalized_width() - 0.25).abs() < 1e-12);
        assert!((session.normalized_height() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_trim_idempotent() {
        let mut raster = RasterBuffer::new(16, 16).unwrap();
        raster.set(4, 4, RGBA8::new(0, 0, 0, 255));
        raster.set(11, 9, RGBA8::new(0, 0, 0, 255));
        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();

        session.trim();
        let once = session.raster().clone();
        let nw = session.normalized_width();
        session.trim();
        assert_eq!(session.raster(), &once);
        assert_eq!(session.normalized_width(), nw);
    }

    #[test]
    fn test_trim_noop_on_fully_transparent() {
        let raster = RasterBuffer::new(8, 8).unwrap();
        let mut session =
            EditSession::new(region_from(raster), EditorConfig::default()).unwrap();
        session.trim();
        assert_eq!(session.raster().width(), 8);
        assert_eq!(session.raster().height(), 8);
        assert_eq!(session.normalized_width(), 0.5);
    }

    #[test]
    fn test_reset_restores_snapshot() {
        let mut session = solid_session(10, 10, RGBA8::new(30, 30, 30, 255));
        session.threshold(200);
        session.erase(Point::new(5.0, 5.0), 3.0);
        session.reset();
        assert!(session
            .raster()
            .pixels()
            .iter()
            .all(|p| *p == RGBA8::new(30, 30, 30, 255)));
    }
}
