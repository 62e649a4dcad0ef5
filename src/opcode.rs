/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// Each such operand is described by a `Field`: a mask selecting its bits and the shift
/// that brings them down to the least significant end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    pub mask: u16,
    pub shift: u8,
}

impl Field {
    /// `[_x__]` refers either to the register Vx or a range of registers V0..Vx
    pub const X: Field = Field::new(0x0F00, 8);

    /// `[__y_]` refers to the register Vy
    pub const Y: Field = Field::new(0x00F0, 4);

    /// `[___n]` a nibble, used as a sprite height
    pub const N: Field = Field::new(0x000F, 0);

    /// `[__kk]` a byte that is assigned to and/or compared with Vx
    pub const KK: Field = Field::new(0x00FF, 0);

    /// `[_adr]` a 12-bit address
    pub const ADDR: Field = Field::new(0x0FFF, 0);

    pub const fn new(mask: u16, shift: u8) -> Self {
        Field { mask, shift }
    }

    /// Pull this field's value out of `op`
    pub fn extract(&self, op: u16) -> u16 {
        (op & self.mask) >> self.shift
    }
}
