mod tests {
    use ledclock_core::font::{FALLBACK_CHAR, GLYPH_HEIGHT, glyph, text_width};
    use ledclock_core::layout::{LayoutError, MatrixLayout, Ring};

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('A').code(), b'A');
        assert_eq!(glyph('M').width(), 5);
        assert_eq!(glyph('M').advance(), 6);
        assert_eq!(glyph(':').width(), 1);
        assert_eq!(glyph('0').width(), 3);
    }

    #[test]
    fn test_unknown_chars_fall_back() {
        assert_eq!(glyph('~').code(), FALLBACK_CHAR);
        assert_eq!(glyph('a').code(), FALLBACK_CHAR);
        assert_eq!(glyph('é').code(), FALLBACK_CHAR);
    }

    #[test]
    fn test_glyph_bits() {
        let m = glyph('M');
        for row in 0..GLYPH_HEIGHT {
            assert!(m.is_lit(0, row));
            assert!(m.is_lit(4, row));
        }
        assert!(!m.is_lit(2, 0));
        assert!(m.is_lit(2, 2));
        assert!(!m.is_lit(5, 0));
        assert!(!m.is_lit(0, GLYPH_HEIGHT));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("AB"), 8);
        assert_eq!(text_width("ab"), 8);
        assert_eq!(text_width("M!"), 8);
        assert_eq!(text_width("12:00"), 18);
    }

    #[test]
    fn test_text_width_saturates() {
        let text = "M".repeat(6000);
        assert_eq!(text_width(&text), i16::MAX);
    }

    #[test]
    fn test_layout_indices() {
        let layout = MatrixLayout::default();

        assert_eq!(layout.matrix_len(), 85);
        assert_eq!(layout.total_len(), 109);
        assert_eq!(layout.xy_index(0, 0), Some(0));
        assert_eq!(layout.xy_index(16, 4), Some(84));
        assert_eq!(layout.xy_index(17, 0), None);
        assert_eq!(layout.xy_index(-1, 0), None);
        assert_eq!(layout.xy_index(0, 5), None);
    }

    #[test]
    fn test_ring_indices_wrap() {
        let layout = MatrixLayout::default();

        assert_eq!(layout.ring_index(Ring::Inner, 0), Some(85));
        assert_eq!(layout.ring_index(Ring::Inner, 13), Some(86));
        assert_eq!(layout.ring_index(Ring::Outer, 11), Some(108));
        assert_eq!(layout.ring_span(Ring::Outer), (97, 12));

        let no_rings = MatrixLayout {
            inner_ring: 0,
            outer_ring: 0,
            ..MatrixLayout::default()
        };
        assert_eq!(no_rings.ring_index(Ring::Inner, 0), None);
    }

    #[test]
    fn test_layout_validation() {
        let layout = MatrixLayout::default();

        assert_eq!(layout.validate(109), Ok(()));
        assert_eq!(
            layout.validate(100),
            Err(LayoutError::BufferTooSmall {
                required: 109,
                capacity: 100
            })
        );

        let empty = MatrixLayout {
            width: 0,
            ..MatrixLayout::default()
        };
        assert_eq!(empty.validate(109), Err(LayoutError::EmptyMatrix));
    }
}
