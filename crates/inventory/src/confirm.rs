/// Synchronous yes/no gate consulted before a destructive operation.
///
/// The call blocks until the operator answers; nothing is mutated until it returns
/// `true`.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
