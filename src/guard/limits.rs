use crate::guard::GuardError;

pub fn enforce_size_limit(count: usize, max: usize) -> Result<(), GuardError> {
    if count > max {
        return Err(GuardError::LimitExceeded { count, max });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/guard/limits.rs"]
mod tests;
