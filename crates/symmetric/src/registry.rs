//! Process-wide registry of the SM4 mode descriptors
//!
//! Built lazily on first use and immutable afterwards, so lookups from any
//! thread share the same descriptors.

use once_cell::sync::Lazy;

use blockmode_algorithms::block::Sm4;

use crate::adapters::{cfb1_descriptor, cfb8_descriptor, ctr_descriptor, gcm_descriptor, wrap_descriptor};
use crate::cipher::{CipherDescriptor, CipherId};

static REGISTRY: Lazy<[CipherDescriptor<Sm4>; 5]> = Lazy::new(|| {
    log::trace!("building cipher registry");
    [
        ctr_descriptor::<Sm4>(),
        cfb1_descriptor::<Sm4>(),
        cfb8_descriptor::<Sm4>(),
        wrap_descriptor::<Sm4>(),
        gcm_descriptor::<Sm4>(),
    ]
});

/// Descriptor for `id`
pub fn lookup(id: CipherId) -> &'static CipherDescriptor<Sm4> {
    &REGISTRY[id.index()]
}

/// Descriptor for a canonical name such as `"sms4-gcm"`
pub fn lookup_by_name(name: &str) -> Option<&'static CipherDescriptor<Sm4>> {
    CipherId::from_name(name).map(lookup)
}

/// All registered descriptors, in [`CipherId::ALL`] order
pub fn descriptors() -> &'static [CipherDescriptor<Sm4>] {
    &REGISTRY[..]
}
