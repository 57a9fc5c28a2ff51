use log::warn;

/// Side length used for every dimension when none are given.
pub const DEFAULT_DIM: usize = 256;

/// Problem dimensions: A is `m x l`, B is `l x n`, C is `m x n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub m: usize,
    pub n: usize,
    pub l: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            m: DEFAULT_DIM,
            n: DEFAULT_DIM,
            l: DEFAULT_DIM,
        }
    }
}

impl Dimensions {
    /// Parse `m n l` from positional arguments (program name already skipped).
    ///
    /// Falls back to 256x256x256 when fewer than three arguments are given or any of
    /// them is not a non-negative integer. Extra arguments are ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().take(3).collect();
        if args.len() < 3 {
            return Self::default();
        }
        let parsed: Result<Vec<usize>, _> =
            args.iter().map(|a| a.as_ref().trim().parse::<usize>()).collect();
        match parsed.as_deref() {
            Ok(&[m, n, l]) => Dimensions { m, n, l },
            _ => {
                warn!("malformed dimensions, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_dimensions() {
        let d = Dimensions::from_args(["128", "64", "32"]);
        assert_eq!(d, Dimensions { m: 128, n: 64, l: 32 });
    }

    #[test]
    fn test_missing_arguments_default() {
        assert_eq!(Dimensions::from_args(Vec::<String>::new()), Dimensions::default());
        assert_eq!(Dimensions::from_args(["12", "12"]), Dimensions::default());
    }

    #[test]
    fn test_malformed_arguments_default() {
        assert_eq!(Dimensions::from_args(["12", "x", "12"]), Dimensions::default());
        assert_eq!(Dimensions::from_args(["-1", "4", "4"]), Dimensions::default());
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let d = Dimensions::from_args(["1", "2", "3", "oops"]);
        assert_eq!(d, Dimensions { m: 1, n: 2, l: 3 });
    }
}
