use anyhow::Result;

pub mod carioca;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
