use anyhow::{Result, anyhow};

/// Longest stored filename, in bytes (common file system limit)
pub const MAX_FILENAME_BYTES: usize = 255;

/// Characters that are replaced with `_` in stored filenames
const RESERVED_CHARS: &[char] = &[':', '*', '?', '"', '<', '>', '|', ';'];

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates an upload size against the configured limit
pub fn validate_file_size(size: usize, max_size: usize) -> Result<()> {
    if size > max_size {
        return Err(anyhow!(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size exceeds maximum allowed {} bytes ({} MB)",
                max_size,
                max_size / 1024 / 1024
            ),
        }));
    }
    Ok(())
}

/// Turns an uploader-supplied filename into a safe name for the storage directory.
///
/// Any directory component is dropped (both `/` and `\` count as separators),
/// control and reserved characters become `_`, and the result is capped at
/// [`MAX_FILENAME_BYTES`]. Empty names, `.`/`..` and hidden names are rejected.
/// Extensions are not restricted.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or("");

    if name.len() != filename.len() {
        tracing::warn!("Path components stripped from upload name: {}", filename);
    }

    if name.trim().is_empty() {
        return Err(anyhow!(ValidationError {
            code: "INVALID_FILENAME",
            message: "Filename cannot be empty".to_string(),
        }));
    }

    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > MAX_FILENAME_BYTES {
        let mut end = MAX_FILENAME_BYTES;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    // Also covers "." and ".."
    if sanitized.starts_with('.') {
        return Err(anyhow!(ValidationError {
            code: "HIDDEN_FILE",
            message: "Filenames starting with '.' are not allowed".to_string(),
        }));
    }

    Ok(sanitized)
}

/// Returns true if `name` can be looked up directly inside the storage directory.
pub fn is_servable_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_size() {
        let max = 10 * 1024 * 1024;
        assert!(validate_file_size(1024, max).is_ok());
        assert!(validate_file_size(max, max).is_ok());
        assert!(validate_file_size(max + 1, max).is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test.pdf").unwrap(), "test.pdf");
        assert_eq!(sanitize_filename("my file.doc").unwrap(), "my file.doc");
        assert_eq!(
            sanitize_filename("test<script>.pdf").unwrap(),
            "test_script_.pdf"
        );
        assert_eq!(sanitize_filename("a:b|c;d.txt").unwrap(), "a_b_c_d.txt");
        assert_eq!(sanitize_filename("tab\there.txt").unwrap(), "tab_here.txt");
        assert_eq!(sanitize_filename("测试.txt").unwrap(), "测试.txt");

        // No extension blocking
        assert_eq!(sanitize_filename("virus.exe").unwrap(), "virus.exe");
        assert_eq!(sanitize_filename("main.cpp").unwrap(), "main.cpp");
    }

    #[test]
    fn test_sanitize_filename_strips_path_traversal() {
        assert_eq!(sanitize_filename("../../../etc/passwd").unwrap(), "passwd");
        assert_eq!(
            sanitize_filename("..\\..\\windows\\system32").unwrap(),
            "system32"
        );
        assert_eq!(sanitize_filename("/abs/path/report.pdf").unwrap(), "report.pdf");
    }

    #[test]
    fn test_sanitize_filename_rejects_unusable_names() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("   ").is_err());
        assert!(sanitize_filename("dir/").is_err());
        assert!(sanitize_filename(".").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("uploads/..").is_err());
        assert!(sanitize_filename(".htaccess").is_err());
        assert!(sanitize_filename(".staging").is_err());
    }

    #[test]
    fn test_sanitize_filename_truncates_on_char_boundary() {
        let long = format!("{}.txt", "é".repeat(200));
        let sanitized = sanitize_filename(&long).unwrap();
        assert!(sanitized.len() <= MAX_FILENAME_BYTES);
        assert!(sanitized.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_is_servable_name() {
        assert!(is_servable_name("photo.png"));
        assert!(!is_servable_name(""));
        assert!(!is_servable_name(".staging"));
        assert!(!is_servable_name("../secret"));
        assert!(!is_servable_name("a\\b"));
    }
}
