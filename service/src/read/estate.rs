//! [`Estate`]-related read definitions.

#[cfg(doc)]
use crate::domain::Estate;

pub mod list {
    //! [`Estate`] list definitions.

    use crate::domain::{estate, Estate};

    /// Filter of an [`Estate`] list.
    ///
    /// An empty [`Filter`] selects all the [`Estate`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`estate::City`] the [`Estate`]s must be located in exactly.
        pub city: Option<estate::City>,
    }

    impl Filter {
        /// Checks whether the provided [`Estate`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, estate: &Estate) -> bool {
            self.city.as_ref().map_or(true, |city| *city == estate.city)
        }
    }
}
