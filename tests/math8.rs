mod tests {
    use ledclock_core::math8::{remap, scale8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
        assert_eq!(scale8(255, 255), 255);
    }

    #[test]
    fn test_remap() {
        assert_eq!(remap(10, 10, 100, 0, 100), 0);
        assert_eq!(remap(55, 10, 100, 0, 100), 50);
        assert_eq!(remap(100, 10, 100, 0, 100), 100);
        assert_eq!(remap(50, 0, 100, 4, 150), 77);
    }

    #[test]
    fn test_remap_clamps_input() {
        assert_eq!(remap(0, 10, 100, 0, 100), 0);
        assert_eq!(remap(4095, 10, 100, 0, 100), 100);
    }

    #[test]
    fn test_remap_empty_range() {
        assert_eq!(remap(5, 10, 10, 3, 9), 3);
        assert_eq!(remap(5, 20, 10, 3, 9), 3);
    }
}
