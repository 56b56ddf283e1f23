use crate::navigation::ModuleId;

/// The shared container every module renders into, plus the chrome around
/// it (navigation markers, body-level auth class, module stylesheet link).
///
/// Implementations are render surfaces; methods are effects, not queries,
/// and must be cheap enough to call from the single-threaded shell loop.
pub trait ContainerPort: Send + Sync {
    /// Drop the container's current contents.
    fn clear(&self);

    /// Append a fetched markup document to the container.
    fn append_markup(&self, html: &str);

    /// Append a fragment wrapped in an inert template holder (the auth
    /// module's four sub-views are parked this way until its script picks
    /// one).
    fn append_template(&self, name: &str, html: &str);

    /// Inject the stylesheet link tagged with the module name.
    fn set_module_stylesheet(&self, module: ModuleId, path: &str);

    /// Remove whatever module stylesheet a previous load injected.
    fn remove_module_stylesheet(&self);

    /// Toggle the body-level marker that hides the sidebar chrome while
    /// the auth module is shown.
    fn set_auth_chrome_hidden(&self, hidden: bool);

    /// Clear the active marker from all nav entries, then mark the entry
    /// for `module` if one exists.
    fn set_active_nav(&self, module: Option<ModuleId>);

    /// Replace the container's contents with an error block naming the
    /// module that failed to load.
    fn show_load_error(&self, module: ModuleId);
}
