pub(crate) trait OptionExtension<T> {
    fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    /// Acts similarly to [`Option::unwrap`] but with [`unreachable!`] in the none branch. Used
    /// for links that the red-black invariants guarantee are present, so reaching the none
    /// branch means the tree itself is broken.
    ///
    /// No panics annotation is used, the semantics are that the caller has already ruled out
    /// None.
    #[track_caller]
    fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None => unreachable!("a link required by the red-black invariants was missing"),
        }
    }
}
