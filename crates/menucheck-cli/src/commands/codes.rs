//! Codes command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the codes command.
pub fn execute_codes(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_codes()?);
    Ok(())
}
