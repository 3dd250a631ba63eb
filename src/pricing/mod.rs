pub mod associate;
pub mod detect;

pub use associate::associate_prices;
pub use detect::{contains_price, detect_fragment_prices, detect_price, find_prices, strip_prices, PriceMatch};
