pub mod f32;
pub mod io;
pub mod masked;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::masked::{AbsolutePhaseMap, DisparityMap, MaskedImageF32, RelativePhaseMap};
pub use self::traits::ImageView;
pub use self::u8::ImageU8;
