pub mod building;
pub mod daily;
pub mod hourly;
pub mod season;
pub mod sensor;

pub use building::*;
pub use daily::*;
pub use hourly::*;
pub use season::*;
pub use sensor::*;
