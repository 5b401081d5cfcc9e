// Trait to generalize over primitive number types that are 1 byte aligned.
pub trait Align1: bytemuck::Pod {}

impl Align1 for u8 {}
impl Align1 for u16 {}
impl Align1 for u32 {}
impl Align1 for u64 {}

// Trait to generalize over primitive number types that are 4 bytes aligned.
// Backing a receive buffer with one of these keeps bulk cell payloads
// castable in place.
pub trait Align4: Align1 {}

impl Align4 for u32 {}
impl Align4 for u64 {}
