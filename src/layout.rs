//! Physical arrangement of the LED chain
//!
//! The chain starts with a row-major rectangular matrix, followed by the
//! inner ring and then the outer ring.

/// Number of LEDs in the default layout
pub const DEFAULT_LED_COUNT: usize = 17 * 5 + 12 + 12;

/// Error returned when a layout does not fit into a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The matrix has zero width or zero height
    EmptyMatrix,
    /// The layout needs more LEDs than the buffer holds
    BufferTooSmall { required: usize, capacity: usize },
}

/// One of the two LED rings around the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Inner,
    Outer,
}

/// Dimensions of the matrix and both rings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLayout {
    pub width: u8,
    pub height: u8,
    pub inner_ring: u8,
    pub outer_ring: u8,
}

impl Default for MatrixLayout {
    fn default() -> Self {
        Self {
            width: 17,
            height: 5,
            inner_ring: 12,
            outer_ring: 12,
        }
    }
}

impl MatrixLayout {
    /// Number of LEDs in the matrix region
    pub const fn matrix_len(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of LEDs in both rings
    pub const fn ring_len(self) -> usize {
        self.inner_ring as usize + self.outer_ring as usize
    }

    /// Total number of LEDs in the chain
    pub const fn total_len(self) -> usize {
        self.matrix_len() + self.ring_len()
    }

    /// Check that the layout fits into a buffer of `capacity` pixels
    pub const fn validate(self, capacity: usize) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::EmptyMatrix);
        }
        let required = self.total_len();
        if required > capacity {
            return Err(LayoutError::BufferTooSmall { required, capacity });
        }
        Ok(())
    }

    /// Index of the matrix cell at column `x`, row `y`
    ///
    /// Returns `None` when the coordinates fall outside the matrix.
    #[allow(clippy::cast_sign_loss)]
    pub const fn xy_index(self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Index of the `pos`-th LED of `ring`, wrapping around the ring
    pub const fn ring_index(self, ring: Ring, pos: usize) -> Option<usize> {
        let (start, len) = self.ring_span(ring);
        if len == 0 {
            return None;
        }
        Some(start + pos % len)
    }

    /// First index and length of `ring`
    pub const fn ring_span(self, ring: Ring) -> (usize, usize) {
        match ring {
            Ring::Inner => (self.matrix_len(), self.inner_ring as usize),
            Ring::Outer => (
                self.matrix_len() + self.inner_ring as usize,
                self.outer_ring as usize,
            ),
        }
    }
}
