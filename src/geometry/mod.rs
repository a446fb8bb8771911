//! Integer geometry in framebuffer space.
//!
//! Coordinates are pixels with y growing downward. Rectangles are half-open:
//! a rect covers `x..x + width` and `y..y + height`. Edge arithmetic saturates
//! at the `i32` range.

/// An area on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Horizontal position of the left edge
    pub x: i32,
    /// Vertical position of the top edge
    pub y: i32,
    /// Width in pixels, never negative
    pub width: i32,
    /// Height in pixels, never negative
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use ufont::geometry::Rect;
    ///
    /// let rect = Rect::new(0, 0, 100, 50);
    /// assert_eq!(rect.width, 100);
    /// assert_eq!(rect.height, 50);
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its top-left and (exclusive) bottom-right corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use ufont::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10, 20, 110, 70);
    /// assert_eq!(rect.x, 10);
    /// assert_eq!(rect.y, 20);
    /// assert_eq!(rect.width, 100);
    /// assert_eq!(rect.height, 50);
    /// ```
    pub fn from_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0).max(0),
            height: y1.saturating_sub(y0).max(0),
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Get the exclusive right edge x-coordinate.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Get the exclusive bottom edge y-coordinate.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if this rectangle covers the pixel at `(x, y)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ufont::geometry::Rect;
    ///
    /// let rect = Rect::new(0, 0, 16, 16);
    /// assert!(rect.contains(0, 0));
    /// assert!(rect.contains(15, 15));
    /// assert!(!rect.contains(16, 0));
    /// ```
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use ufont::geometry::Rect;
    ///
    /// let r1 = Rect::new(0, 0, 50, 50);
    /// let r2 = Rect::new(25, 25, 50, 50);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union.x, 0);
    /// assert_eq!(union.y, 0);
    /// assert_eq!(union.right(), 75);
    /// assert_eq!(union.bottom(), 75);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Move the rectangle horizontally.
    pub fn translate_x(&self, dx: i32) -> Rect {
        Rect {
            x: self.x.saturating_add(dx),
            ..*self
        }
    }

    /// Compute the area of the rectangle.
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

/// Union of an optional accumulator with another rectangle.
pub(crate) fn union_opt(acc: Option<Rect>, rect: Rect) -> Option<Rect> {
    Some(match acc {
        Some(r) => r.union(&rect),
        None => rect,
    })
}
