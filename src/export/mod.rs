mod csv;
mod ofx;
mod qif;
mod rows;

pub use self::csv::to_csv;
pub use ofx::to_ofx;
pub use qif::to_qif;
pub use rows::{to_rows, Cell};
