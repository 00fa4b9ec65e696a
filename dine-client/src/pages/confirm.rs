use shared::order::Confirmation;

/// Asked before anything is deleted
pub const DELETE_CONFIRMATION: Confirmation = Confirmation {
    title: "Are you sure?",
    text: "You won't be able to revert this!",
};

/// Confirmation dialog
pub trait Confirm {
    fn confirm(&self, confirmation: &Confirmation) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&Confirmation) -> bool,
{
    fn confirm(&self, confirmation: &Confirmation) -> bool {
        self(confirmation)
    }
}

/// Answers every dialog the same way (`--yes`, scripted runs)
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _: &Confirmation) -> bool {
        self.0
    }
}
