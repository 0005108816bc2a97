use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`NativeHashing`] when none is given.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else {
        /// The hasher builder used by [`NativeHashing`] when none is given.
        pub type DefaultHashBuilder = std::hash::RandomState;
    }
}

/// Hashing and equality used by a map to place and find its keys.
///
/// Implementations must be consistent: `equals(a, b)` implies
/// `hash_code(a) == hash_code(b)`. A strategy over `Option<T>` keys must
/// accept `None` like any other key.
///
/// # Examples
///
/// ```rust
/// use bool_hash::HashingStrategy;
/// use bool_hash::ObjectBooleanHashMap;
///
/// struct CaseInsensitive;
///
/// impl HashingStrategy<String> for CaseInsensitive {
///     fn hash_code(&self, key: &String) -> u64 {
///         key.bytes()
///             .fold(0xcbf29ce484222325, |h, b| {
///                 (h ^ b.to_ascii_lowercase() as u64).wrapping_mul(0x100000001b3)
///             })
///     }
///
///     fn equals(&self, a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
/// }
///
/// let mut map = ObjectBooleanHashMap::with_hashing_strategy(CaseInsensitive);
/// map.put("Rust".to_string(), true);
/// assert_eq!(map.get(&"RUST".to_string()), Some(true));
/// ```
pub trait HashingStrategy<K: ?Sized> {
    /// Returns a hash consistent with [`equals`](HashingStrategy::equals).
    fn hash_code(&self, key: &K) -> u64;

    /// Returns `true` if both keys denote the same map entry.
    fn equals(&self, a: &K, b: &K) -> bool;
}

impl<K: ?Sized, H: HashingStrategy<K> + ?Sized> HashingStrategy<K> for &H {
    #[inline]
    fn hash_code(&self, key: &K) -> u64 {
        (**self).hash_code(key)
    }

    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        (**self).equals(a, b)
    }
}

/// The default strategy: the key's own `Hash` and `Eq` implementations, fed
/// through a [`BuildHasher`].
#[derive(Clone, Default)]
pub struct NativeHashing<S = DefaultHashBuilder> {
    hash_builder: S,
}

impl<S> NativeHashing<S> {
    /// Creates a strategy hashing keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<S: Default> NativeHashing<S> {
    /// Creates a strategy using a default-constructed hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<S> Debug for NativeHashing<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NativeHashing").finish_non_exhaustive()
    }
}

impl<K, S> HashingStrategy<K> for NativeHashing<S>
where
    K: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash_code(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }

    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone, Default)]
    struct FixedSip;

    impl BuildHasher for FixedSip {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(7, 11)
        }
    }

    #[test]
    fn native_hashing_is_deterministic_per_builder() {
        let strategy = NativeHashing::with_hasher(FixedSip);
        assert_eq!(strategy.hash_code("key"), strategy.hash_code("key"));
        assert!(strategy.equals("key", "key"));
        assert!(!strategy.equals("key", "other"));
    }

    #[test]
    fn none_key_hashes_consistently() {
        let strategy = NativeHashing::with_hasher(FixedSip);
        let none: Option<&str> = None;
        assert_eq!(strategy.hash_code(&none), strategy.hash_code(&None::<&str>));
        assert!(strategy.equals(&none, &None));
        assert!(!strategy.equals(&none, &Some("")));
    }

    #[test]
    fn references_forward_to_the_strategy() {
        let strategy = NativeHashing::with_hasher(FixedSip);
        let by_ref = &strategy;
        assert_eq!(
            HashingStrategy::<u64>::hash_code(&by_ref, &5),
            strategy.hash_code(&5u64)
        );
        assert!(HashingStrategy::<u64>::equals(&by_ref, &5, &5));
    }
}
