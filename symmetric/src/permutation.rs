/// A permutation in the mathematical sense.
pub trait Permutation<T: Clone>: Clone {
    fn permute(&self, input: T) -> T;

    fn permute_mut(&self, input: &mut T) {
        *input = self.permute(input.clone());
    }
}

/// A permutation that can also be run backwards.
pub trait InvertiblePermutation<T: Clone>: Permutation<T> {
    /// Recovers `x` from `self.permute(x)`.
    fn inverse_permute(&self, output: T) -> T;

    fn inverse_permute_mut(&self, output: &mut T) {
        *output = self.inverse_permute(output.clone());
    }
}

/// A permutation thought to be cryptographically secure, in the sense that it is thought to be
/// difficult to distinguish (in a nontrivial way) from a random permutation.
pub trait CryptographicPermutation<T: Clone>: Permutation<T> {}
