/// Size of the map viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size<Num: num_traits::Num + PartialOrd + Copy + PartialEq = f64> {
    width: Num,
    height: Num,
}

impl<Num: num_traits::Num + PartialOrd + Copy> Size<Num> {
    /// Creates a new size.
    pub fn new(width: Num, height: Num) -> Self {
        Self { width, height }
    }

    /// Width of the viewport.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Height of the viewport.
    pub fn height(&self) -> Num {
        self.height
    }
}
