pub(crate) mod adapters;
pub(crate) mod draft;
pub(crate) mod filters;
pub(crate) mod query;
pub(crate) mod queue;
pub(crate) mod snippet;
pub(crate) mod suggest;
