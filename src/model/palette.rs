use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

// matplotlib "tab10", in cycle order.
pub const TAB_BLUE: Rgb = Rgb(0x1f, 0x77, 0xb4);
pub const TAB_ORANGE: Rgb = Rgb(0xff, 0x7f, 0x0e);
pub const TAB_GREEN: Rgb = Rgb(0x2c, 0xa0, 0x2c);
pub const TAB_RED: Rgb = Rgb(0xd6, 0x27, 0x28);
pub const TAB_PURPLE: Rgb = Rgb(0x94, 0x67, 0xbd);
pub const TAB_BROWN: Rgb = Rgb(0x8c, 0x56, 0x4b);
pub const TAB_PINK: Rgb = Rgb(0xe3, 0x77, 0xc2);
pub const TAB_GREY: Rgb = Rgb(0x7f, 0x7f, 0x7f);
pub const TAB_OLIVE: Rgb = Rgb(0xbc, 0xbd, 0x22);
pub const TAB_CYAN: Rgb = Rgb(0x17, 0xbe, 0xcf);

const TAB10: [Rgb; 10] = [
    TAB_BLUE, TAB_ORANGE, TAB_GREEN, TAB_RED, TAB_PURPLE, TAB_BROWN, TAB_PINK, TAB_GREY,
    TAB_OLIVE, TAB_CYAN,
];

pub fn cycle_color(idx: usize) -> Rgb {
    TAB10[idx % TAB10.len()]
}
