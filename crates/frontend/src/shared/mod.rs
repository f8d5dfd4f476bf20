pub mod storage;
pub mod theme;
