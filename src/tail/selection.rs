/// Digits typed on the variant list, composed into a 1-based number.
#[derive(Debug, Default)]
pub struct SelectionBuffer {
    digits: String,
}

impl SelectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a digit. Returns the number once no further digit could still
    /// name one of `count` variants; a leading zero commits immediately.
    pub fn push(&mut self, digit: u8, count: usize) -> Option<usize> {
        self.digits.push(char::from(b'0' + digit.min(9)));
        let number = self.value();

        if number == 0 || number.saturating_mul(10) > count {
            self.digits.clear();
            Some(number)
        } else {
            None
        }
    }

    /// Commit whatever has been typed (Enter).
    pub fn confirm(&mut self) -> Option<usize> {
        if self.digits.is_empty() {
            return None;
        }
        let number = self.value();
        self.digits.clear();
        Some(number)
    }

    pub fn erase(&mut self) {
        self.digits.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    fn value(&self) -> usize {
        self.digits.parse().unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_digit_commits_for_small_lists() {
        let mut buffer = SelectionBuffer::new();
        assert_eq!(buffer.push(2, 2), Some(2));
        assert_eq!(buffer.push(3, 2), Some(3));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_two_digit_selection() {
        let mut buffer = SelectionBuffer::new();
        assert_eq!(buffer.push(1, 12), None);
        assert_eq!(buffer.as_str(), "1");
        assert_eq!(buffer.push(2, 12), Some(12));
    }

    #[test]
    fn test_confirm_and_erase() {
        let mut buffer = SelectionBuffer::new();
        assert_eq!(buffer.confirm(), None);
        assert_eq!(buffer.push(1, 15), None);
        assert_eq!(buffer.confirm(), Some(1));

        buffer.push(1, 15);
        buffer.erase();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_leading_zero_commits() {
        let mut buffer = SelectionBuffer::new();
        assert_eq!(buffer.push(0, 40), Some(0));
    }
}
