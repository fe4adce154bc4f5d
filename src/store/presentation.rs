//! Presentation store sugar and style projections.
//!
//! A host UI typically binds one slot per presentation style. The projections
//! expose the top entry only when it has that style, so at most one slot is
//! ever filled. Clearing a slot dismisses only when that slot's style is the
//! top, which keeps a late UI callback from dismissing some other layer.

use log::debug;

use crate::core::presentation::{
    PresentationAction, PresentationConfig, PresentationState, PresentationStyle,
    PresentedDestination,
};
use crate::core::route::Route;
use crate::store::Store;

pub type PresentationStore<R> = Store<PresentationState<R>>;

impl<R: Route> Store<PresentationState<R>> {
    pub fn top(&self) -> Option<PresentedDestination<R>> {
        self.state().top().cloned()
    }

    pub fn count(&self) -> usize {
        self.state().len()
    }

    pub fn present(
        &self,
        destination: R,
        style: PresentationStyle,
        config: PresentationConfig,
        embed: bool,
    ) {
        self.dispatch(PresentationAction::Present {
            destination,
            style,
            config,
            embed,
        });
    }

    pub fn sheet(&self, destination: R) {
        self.sheet_with(destination, PresentationConfig::default());
    }

    pub fn sheet_with(&self, destination: R, config: PresentationConfig) {
        self.present(destination, PresentationStyle::Sheet, config, false);
    }

    pub fn full_screen_cover(&self, destination: R) {
        self.present(
            destination,
            PresentationStyle::FullScreenCover,
            PresentationConfig::default(),
            false,
        );
    }

    pub fn dismiss(&self) {
        self.dispatch(PresentationAction::Dismiss);
    }

    pub fn dismiss_all(&self) {
        self.dispatch(PresentationAction::DismissAll);
    }

    /// Dismisses down to the deepest layer showing `destination`. Returns
    /// true only when such a layer existed and the dismissal was applied
    /// unchanged by middleware.
    pub fn dismiss_to(&self, destination: R) -> bool {
        let found = self.state().contains(&destination);
        let action = PresentationAction::DismissTo(destination);
        let applied = self.dispatch_applied(action.clone());
        found && applied == Some(action)
    }

    pub fn replace(
        &self,
        destination: R,
        style: PresentationStyle,
        config: PresentationConfig,
        embed: bool,
    ) {
        self.dispatch(PresentationAction::Replace {
            destination,
            style,
            config,
            embed,
        });
    }

    /// Top entry, if it is a sheet.
    pub fn presented_sheet(&self) -> Option<PresentedDestination<R>> {
        self.presented(PresentationStyle::Sheet)
    }

    /// Top entry, if it is a full-screen cover.
    pub fn presented_cover(&self) -> Option<PresentedDestination<R>> {
        self.presented(PresentationStyle::FullScreenCover)
    }

    pub fn set_presented_sheet(&self, value: Option<PresentedDestination<R>>) {
        self.set_presented(PresentationStyle::Sheet, value);
    }

    pub fn set_presented_cover(&self, value: Option<PresentedDestination<R>>) {
        self.set_presented(PresentationStyle::FullScreenCover, value);
    }

    fn presented(&self, style: PresentationStyle) -> Option<PresentedDestination<R>> {
        self.state().top_with_style(style).cloned()
    }

    fn set_presented(&self, style: PresentationStyle, value: Option<PresentedDestination<R>>) {
        if value.is_some() {
            // Presenting goes through actions; a binding can only clear.
            return;
        }
        if self.state().top_with_style(style).is_some() {
            self.dismiss();
        } else {
            debug!("Ignoring {:?} clear: not the top layer", style);
        }
    }
}
