pub mod pipeline;
pub mod translator;
