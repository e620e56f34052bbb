pub mod boxstats;
pub mod palette;
pub mod sources;
pub mod units;

pub use boxstats::BoxStats;
pub use palette::Rgb;
pub use sources::Source;
pub use units::Unit;
