pub mod acoustics_desc;

pub use acoustics_desc::AcousticsDesc;
