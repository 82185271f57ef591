use super::{DbState, Identity, Permission, Repository};
use crate::error::LibraryError;
use crate::form::SavedForm;
use chrono::Utc;

/// The saved forms of every organization, with access checks and persistence.
pub struct FormLibrary {
    db: DbState,
    repository: Box<dyn Repository>,
}

impl FormLibrary {
    /// Loads the stored snapshot, or starts from [`DbState::seeded`] when there is none.
    ///
    /// An unreadable snapshot is returned as an error and left untouched on disk.
    pub fn open(repository: Box<dyn Repository>) -> Result<Self, LibraryError> {
        let db = match repository.load_snapshot()? {
            Some(db) => db,
            None => {
                log::info!("No stored workspace, starting from the seeded defaults");
                DbState::seeded()
            }
        };
        Ok(Self { db, repository })
    }

    /// Persists `db` and adopts it only once the repository accepted it.
    fn commit(&mut self, db: DbState) -> Result<(), LibraryError> {
        self.repository.save_snapshot(&db)?;
        self.db = db;
        Ok(())
    }

    pub fn db(&self) -> &DbState {
        &self.db
    }

    pub fn identity(&self, user_id: &str) -> Option<Identity> {
        self.db.identity(user_id)
    }

    /// Forms of the caller's organization, in storage order.
    pub fn list(&self, who: &Identity) -> Result<Vec<&SavedForm>, LibraryError> {
        require(who, Permission::FormRead)?;
        Ok(self
            .db
            .forms
            .iter()
            .filter(|form| form.organization_id == who.organization_id)
            .collect())
    }

    /// A new, unsaved "Untitled Form" owned by the caller's organization.
    pub fn create(&self, who: &Identity) -> Result<SavedForm, LibraryError> {
        require(who, Permission::FormCreate)?;
        Ok(SavedForm::new(who.organization_id.clone()))
    }

    pub fn load(&self, who: &Identity, form_id: &str) -> Result<SavedForm, LibraryError> {
        require(who, Permission::FormRead)?;
        let form = self
            .db
            .form(form_id)
            .ok_or_else(|| LibraryError::FormNotFound(form_id.to_string()))?;
        same_organization(who, form)?;
        Ok(form.clone())
    }

    /// Stamps `savedAt`, replaces the form with the same id (or appends it) and persists
    /// the workspace. Returns the stored copy.
    pub fn save(&mut self, who: &Identity, mut form: SavedForm) -> Result<SavedForm, LibraryError> {
        same_organization(who, &form)?;
        let existing = self.db.forms.iter().position(|f| f.id == form.id);
        match existing {
            Some(index) => {
                require(who, Permission::FormUpdate)?;
                same_organization(who, &self.db.forms[index])?;
            }
            None => require(who, Permission::FormCreate)?,
        }

        form.saved_at = Utc::now();
        let mut db = self.db.clone();
        match existing {
            Some(index) => db.forms[index] = form.clone(),
            None => db.forms.push(form.clone()),
        }
        self.commit(db)?;
        log::info!("Saved form '{}' ({})", form.name(), form.id);
        Ok(form)
    }

    pub fn delete(&mut self, who: &Identity, form_id: &str) -> Result<SavedForm, LibraryError> {
        require(who, Permission::FormDelete)?;
        let index = self
            .db
            .forms
            .iter()
            .position(|form| form.id == form_id)
            .ok_or_else(|| LibraryError::FormNotFound(form_id.to_string()))?;
        same_organization(who, &self.db.forms[index])?;

        let mut db = self.db.clone();
        let removed = db.forms.remove(index);
        self.commit(db)?;
        log::info!("Deleted form '{}'", removed.id);
        Ok(removed)
    }
}

fn require(who: &Identity, permission: Permission) -> Result<(), LibraryError> {
    if who.can(permission) {
        Ok(())
    } else {
        Err(LibraryError::PermissionDenied {
            user_id: who.user_id.clone(),
            permission: permission.to_string(),
        })
    }
}

fn same_organization(who: &Identity, form: &SavedForm) -> Result<(), LibraryError> {
    if form.organization_id == who.organization_id {
        Ok(())
    } else {
        Err(LibraryError::WrongOrganization {
            form_id: form.id.clone(),
        })
    }
}
