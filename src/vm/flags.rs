use crate::config::Word;
use bitflags::bitflags;

bitflags! {
    /// Condition flags in the `FL` register layout `00000LGE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        const EQUAL = 1 << 0;
        const GREATER = 1 << 1;
        const LESS = 1 << 2;
    }
}

impl Flags {
    /// Flags produced by comparing `a` with `b`. Exactly one flag is set;
    /// nothing carries over from an earlier comparison.
    pub fn compare(a: Word, b: Word) -> Flags {
        if a == b {
            Flags::EQUAL
        } else if a < b {
            Flags::LESS
        } else {
            Flags::GREATER
        }
    }

    pub fn is_equal(self) -> bool {
        self.contains(Flags::EQUAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare() {
        assert_eq!(Flags::EQUAL, Flags::compare(5, 5));
        assert_eq!(Flags::LESS, Flags::compare(3, 7));
        assert_eq!(Flags::GREATER, Flags::compare(7, 3));
        assert_eq!(Flags::LESS, Flags::compare(0x00, 0xff));
        assert_eq!(0b001, Flags::compare(0, 0).bits());
        assert_eq!(0b010, Flags::compare(1, 0).bits());
        assert_eq!(0b100, Flags::compare(0, 1).bits());
    }

    #[test]
    fn exactly_one_flag() {
        for a in 0..=255u8 {
            for &b in [0u8, 1, 127, 128, 254, 255].iter() {
                assert_eq!(1, Flags::compare(a, b).bits().count_ones());
            }
        }
    }
}
