//! Scoped host state
//!
//! Hosts need objects switched into edit mode before their points can be
//! selected or deleted, and users expect their active object and mode back
//! afterwards. Both transitions are tied to guard lifetimes so that every
//! exit path, including `?` on a host error, restores them.

use pathdecim_core::{CurveHost, ObjectId, ObjectMode, Result};
use std::ops::{Deref, DerefMut};

/// Restores the host's active object and its mode when dropped.
///
/// Restoration is best effort: failures are logged and otherwise ignored.
/// When the host had no active object nothing is restored.
pub struct ActiveStateGuard<'a, H: CurveHost + ?Sized> {
    host: &'a mut H,
    previous: Option<(ObjectId, ObjectMode)>,
}

impl<'a, H: CurveHost + ?Sized> ActiveStateGuard<'a, H> {
    /// Record the current active object and mode
    pub fn new(host: &'a mut H) -> Self {
        let previous = host
            .active_object()
            .map(|id| (id, host.object_mode(id).unwrap_or_default()));
        Self { host, previous }
    }

    /// The state that will be restored on drop
    pub fn previous(&self) -> Option<(ObjectId, ObjectMode)> {
        self.previous
    }
}

impl<H: CurveHost + ?Sized> Deref for ActiveStateGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: CurveHost + ?Sized> DerefMut for ActiveStateGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: CurveHost + ?Sized> Drop for ActiveStateGuard<'_, H> {
    fn drop(&mut self) {
        let Some((id, mode)) = self.previous else {
            return;
        };
        if let Err(e) = self.host.set_active_object(Some(id)) {
            log::debug!("could not restore active object {}: {}", id, e);
            return;
        }
        if let Err(e) = self.host.set_object_mode(id, mode) {
            log::debug!("could not restore {} mode on {}: {}", mode, id, e);
        }
    }
}

/// Keeps one object in edit mode for the guard's lifetime.
///
/// Entering first drops the object back to object mode if it is in any other
/// mode, then switches to edit mode. Leaving returns it to object mode.
pub struct EditSession<'a, H: CurveHost + ?Sized> {
    host: &'a mut H,
    object: ObjectId,
    open: bool,
}

impl<'a, H: CurveHost + ?Sized> EditSession<'a, H> {
    /// Switch `object` into edit mode. The object must be the active one for
    /// hosts that only edit the active object.
    pub fn enter(host: &'a mut H, object: ObjectId) -> Result<Self> {
        if host.object_mode(object)? != ObjectMode::Object {
            host.set_object_mode(object, ObjectMode::Object)?;
        }
        host.set_object_mode(object, ObjectMode::Edit)?;
        Ok(Self {
            host,
            object,
            open: true,
        })
    }

    /// Leave edit mode, reporting any host error
    pub fn finish(mut self) -> Result<()> {
        self.open = false;
        self.host.set_object_mode(self.object, ObjectMode::Object)
    }
}

impl<H: CurveHost + ?Sized> Deref for EditSession<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: CurveHost + ?Sized> DerefMut for EditSession<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: CurveHost + ?Sized> Drop for EditSession<'_, H> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        if let Err(e) = self.host.set_object_mode(self.object, ObjectMode::Object) {
            log::debug!("could not leave edit mode on {}: {}", self.object, e);
        }
    }
}
