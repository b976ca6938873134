//! Import and paste command implementations.

use crate::cli::{ImportArgs, PasteArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use menucheck_importer::{import_csv, import_paste};
use std::io::Read;
use std::path::Path;

/// Read a whole input file
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file, or stdin when no path (or `-`) is given
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => read_file(path),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Execute the import command.
pub fn execute_import(args: ImportArgs, formatter: &Formatter) -> Result<()> {
    let text = read_file(&args.file)?;
    let result = import_csv(&text);

    println!("{}", formatter.format_import(&result)?);

    Ok(())
}

/// Execute the paste command.
pub fn execute_paste(args: PasteArgs, formatter: &Formatter) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let result = import_paste(&text)?;

    println!("{}", formatter.format_import(&result)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliFormat;
    use menucheck_domain::ExportMode;
    use std::io::Write;

    fn formatter() -> Formatter {
        Formatter::new(CliFormat::Json, ExportMode::Codes, false)
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Name,Allergene\nGulasch,A I").unwrap();

        let text = read_input(Some(file.path())).unwrap();
        assert!(text.starts_with("Name,Allergene"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, CliError::ReadFile { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn test_import_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Gericht,Allergene,Zusatzstoffe\nGulasch,\"A, I\",").unwrap();

        let args = ImportArgs {
            file: file.path().to_path_buf(),
        };
        assert!(execute_import(args, &formatter()).is_ok());
    }

    #[test]
    fn test_paste_empty_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();

        let args = PasteArgs {
            file: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            execute_paste(args, &formatter()),
            Err(CliError::Import(_))
        ));
    }
}
