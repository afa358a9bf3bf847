pub mod category;
pub mod estimate;
pub mod factor;
pub mod performance;
pub mod selection;
