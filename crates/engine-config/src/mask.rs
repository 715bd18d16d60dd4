//! Credential masking for logged connection strings.

/// Replace the value of every `password=` / `pwd=` field (any case) with
/// `****`, leaving all other segments verbatim. Works on both `;`-separated
/// and whitespace-separated keyword/value strings, and is idempotent.
pub fn mask_password(connection_string: &str) -> String {
    let mut masked = String::with_capacity(connection_string.len());
    let mut segment = String::new();

    for ch in connection_string.chars() {
        if ch == ';' || ch.is_whitespace() {
            masked.push_str(&mask_segment(&segment));
            masked.push(ch);
            segment.clear();
        } else {
            segment.push(ch);
        }
    }
    masked.push_str(&mask_segment(&segment));
    masked
}

fn mask_segment(segment: &str) -> String {
    match segment.split_once('=') {
        Some((key, _))
            if key.eq_ignore_ascii_case("password") || key.eq_ignore_ascii_case("pwd") =>
        {
            format!("{key}=****")
        }
        _ => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_every_password_segment_case_insensitively() {
        let masked = mask_password("Driver=X;Uid=app;PWD=hunter2;Server=db;Password=extra;");
        assert_eq!(masked, "Driver=X;Uid=app;PWD=****;Server=db;Password=****;");
    }

    #[test]
    fn masks_space_separated_keyword_strings() {
        let masked = mask_password("host=db port=5432 user=app password=s3cret sslmode=prefer");
        assert_eq!(
            masked,
            "host=db port=5432 user=app password=**** sslmode=prefer"
        );
    }

    #[test]
    fn masking_is_idempotent() {
        let once = mask_password("pwd=secret;host=db");
        assert_eq!(once, "pwd=****;host=db");
        assert_eq!(mask_password(&once), once);
    }

    #[test]
    fn strings_without_credentials_pass_through_verbatim() {
        let input = "host=db;port=5432;database=reports";
        assert_eq!(mask_password(input), input);
    }
}
