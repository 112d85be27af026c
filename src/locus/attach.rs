//! Attaching ranges to parsed entities.

use super::Range;
use crate::errors::{ Error, Result };

/// Implemented by parsed entities that may remember where they came from.
///
/// An entity owns its range outright. Entities built by hand rather than by a
/// parser return `None`.
pub trait Located {
    /// The range this entity was parsed from, if any.
    fn locus(&self) -> Option<&Range>;
}

impl Located for Range {
    fn locus(&self) -> Option<&Range> {
        Some(self)
    }
}

impl<T: Located> Located for Box<T> {
    fn locus(&self) -> Option<&Range> {
        (**self).locus()
    }
}

/// Copies the locus of `entity` into `out`.
///
/// Fails with [`Error::InvalidArgument`] when `entity` is absent, with
/// [`Error::NullOutputTarget`] when `out` is absent and with
/// [`Error::NotFound`] when the entity has no locus. `out` is only written on
/// success, and what it receives is an independent [`Range::copy`].
pub fn get_locus<E: Located + ?Sized>(entity: Option<&E>, out: Option<&mut Range>) -> Result<()> {
    let entity = entity.ok_or(Error::InvalidArgument)?;
    let out = out.ok_or(Error::NullOutputTarget)?;
    let locus = entity.locus().ok_or(Error::NotFound)?;
    *out = locus.copy()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locus::Point;

    struct Entity {
        locus: Option<Range>,
    }

    impl Located for Entity {
        fn locus(&self) -> Option<&Range> {
            self.locus.as_ref()
        }
    }

    fn sample() -> Range {
        Range::new(Point::new("mailcap", 2, 1), Point::new("mailcap", 2, 20))
    }

    #[test]
    fn get_locus_ok() {
        let e = Entity { locus: Some(sample()) };
        let mut out = Range::default();
        get_locus(Some(&e), Some(&mut out)).unwrap();
        assert_eq!(out, sample());
        drop(e);
        assert_eq!(out.to_string(), "mailcap:2.1-20");
    }

    #[test]
    fn get_locus_not_found_leaves_output() {
        let e = Entity { locus: None };
        let before = Range::point(Point::new("keep", 9, 9));
        let mut out = before.clone();
        let res = get_locus(Some(&e), Some(&mut out));
        assert!(matches!(res, Err(Error::NotFound)));
        assert_eq!(out, before);
    }

    #[test]
    fn get_locus_absent_entity() {
        let mut out = Range::default();
        let res = get_locus::<Entity>(None, Some(&mut out));
        assert!(matches!(res, Err(Error::InvalidArgument)));
        assert_eq!(out, Range::default());
    }

    #[test]
    fn get_locus_absent_output() {
        let e = Entity { locus: Some(sample()) };
        assert!(matches!(get_locus(Some(&e), None), Err(Error::NullOutputTarget)));
    }

    #[test]
    fn absent_entity_is_checked_before_output() {
        assert!(matches!(get_locus::<Entity>(None, None), Err(Error::InvalidArgument)));
    }
}
