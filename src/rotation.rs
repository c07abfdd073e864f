use std::fmt;

/// The rebalancing action chosen for a node whose balance factor has reached `±2`. See [the
/// Wikipedia page][wiki] for the naming of the four cases.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Rotation {
    /// The left child is too tall and leans left (or not at all).
    Right,
    /// The right child is too tall and leans right (or not at all).
    Left,
    /// The left child is too tall and leans right.
    LeftRight,
    /// The right child is too tall and leans left.
    RightLeft,
}

impl Rotation {
    /// Picks the rotation for a node with the given balance factor, where `child_factor` is the
    /// balance factor of the taller child. Returns `None` if the node is already balanced.
    pub(crate) fn choose(factor: isize, child_factor: isize) -> Option<Self> {
        match factor {
            2 if child_factor >= 0 => Some(Self::Right),
            2 => Some(Self::LeftRight),
            -2 if child_factor <= 0 => Some(Self::Left),
            -2 => Some(Self::RightLeft),
            _ => None,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::LeftRight => "left-right",
            Self::RightLeft => "right-left",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_factors_need_no_rotation() {
        for factor in -1..=1 {
            for child_factor in -1..=1 {
                assert_eq!(Rotation::choose(factor, child_factor), None);
            }
        }
    }

    #[test]
    fn left_heavy_cases() {
        assert_eq!(Rotation::choose(2, 1), Some(Rotation::Right));
        assert_eq!(Rotation::choose(2, 0), Some(Rotation::Right));
        assert_eq!(Rotation::choose(2, -1), Some(Rotation::LeftRight));
    }

    #[test]
    fn right_heavy_cases() {
        assert_eq!(Rotation::choose(-2, -1), Some(Rotation::Left));
        assert_eq!(Rotation::choose(-2, 0), Some(Rotation::Left));
        assert_eq!(Rotation::choose(-2, 1), Some(Rotation::RightLeft));
    }
}
