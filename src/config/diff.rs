use super::ConfigSnapshot;

/// Computes the subset of `current` that is new or changed relative to
/// `recorded`.
///
/// A key appears in the result when it is absent from `recorded` or when its
/// value differs under structural equality. Values of different JSON types
/// never compare equal, so an integer `1` and a string `"1"` count as a
/// change. Compound values (arrays, nested objects) are compared deeply, not
/// by identity.
///
/// Keys present only in `recorded` are ignored: the delta describes what to
/// apply, not what disappeared. Every key in the result therefore exists in
/// `current` with the identical value.
///
/// The function is pure and total: no I/O, no mutation of its inputs, no
/// failure mode. Calling it twice with the same inputs yields structurally
/// equal results.
pub fn changed_options(current: &ConfigSnapshot, recorded: &ConfigSnapshot) -> ConfigSnapshot {
    let mut delta = ConfigSnapshot::new();

    for (option, value) in current {
        match recorded.get(option) {
            Some(previous) if previous == value => {}
            _ => {
                delta.insert(option.clone(), value.clone());
            }
        }
    }

    delta
}
