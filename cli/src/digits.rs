use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitError {
    #[error("'{value}' is not a non-negative decimal number")]
    NotANumber { value: String },

    #[error("line {line}: '{value}' is not a non-negative decimal number")]
    InvalidLine { line: usize, value: String },
}

fn is_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Add two arbitrary-length decimal digit strings.
///
/// The result has no leading zeros (except for the value `0` itself).
pub fn add_digit_strings(a: &str, b: &str) -> Result<String, DigitError> {
    for s in [a, b] {
        if !is_digit_string(s) {
            return Err(DigitError::NotANumber {
                value: s.to_string(),
            });
        }
    }

    let (a, b) = (a.as_bytes(), b.as_bytes());
    let len = a.len().max(b.len());
    let mut digits: Vec<u8> = Vec::with_capacity(len + 1);
    let mut carry = 0u8;

    // Column addition from the least significant digit.
    for i in 0..len {
        let da = if i < a.len() { a[a.len() - 1 - i] - b'0' } else { 0 };
        let db = if i < b.len() { b[b.len() - 1 - i] - b'0' } else { 0 };
        let sum = da + db + carry;
        digits.push(b'0' + sum % 10);
        carry = sum / 10;
    }
    if carry > 0 {
        digits.push(b'0' + carry);
    }

    while digits.len() > 1 && digits.last() == Some(&b'0') {
        digits.pop();
    }
    digits.reverse();

    // Every byte is an ASCII digit.
    Ok(digits.into_iter().map(char::from).collect())
}

/// Sum one number per line. Blank lines are skipped.
pub fn sum_lines<S: AsRef<str>>(lines: &[S]) -> Result<String, DigitError> {
    let mut total = String::from("0");
    for (i, line) in lines.iter().enumerate() {
        let value = line.as_ref().trim();
        if value.is_empty() {
            continue;
        }
        total = add_digit_strings(&total, value).map_err(|_| DigitError::InvalidLine {
            line: i + 1,
            value: value.to_string(),
        })?;
    }
    Ok(total)
}
