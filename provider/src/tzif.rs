//! A provider backed by TZif data.
//!
//! `TZif` stands for Time zone information format and is laid out by
//! [RFC 8536][rfc8536] and the [tzdata manual][tzif-manual]. Parsing is done
//! by the `tzif` [crate][tzif-crate].
//!
//! Identifiers are resolved against the database bundled by `jiff-tzdb`.
//! On unix, identifiers missing from the bundle are looked up in the
//! system's zoneinfo directory.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-manual]: https://man7.org/linux/man-pages/man5/tzfile.5.html
//! [tzif-crate]: https://docs.rs/tzif/latest/tzif/

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
#[cfg(unix)]
use std::path::PathBuf;
use std::sync::RwLock;

use combine::Parser;
use tzif::data::{
    posix::PosixTzString,
    time::Seconds,
    tzif::{DataBlock, TzifData},
};

use crate::{
    common,
    provider::{TimeZoneProvider, TimeZoneProviderResult, UtcOffsetSeconds},
    TimeZoneProviderError,
};

#[cfg(unix)]
const ZONEINFO_DIR: &str = "/usr/share/zoneinfo/";

/// A parsed TZif file.
///
/// Only the version 2+ data block and footer are retained, which carry
/// 64-bit transition times.
#[derive(Debug, Clone)]
pub struct Tzif {
    data_block: DataBlock,
    footer: Option<PosixTzString>,
}

impl TryFrom<TzifData> for Tzif {
    type Error = TimeZoneProviderError;

    fn try_from(value: TzifData) -> Result<Self, Self::Error> {
        let TzifData {
            data_block2,
            footer,
            ..
        } = value;
        let data_block = data_block2.ok_or(TimeZoneProviderError::Misc(
            "TZif data is missing the version 2 data block.".into(),
        ))?;
        if data_block.local_time_type_records.is_empty() {
            return Err(TimeZoneProviderError::Assert(
                "TZif data must contain at least one local time type.",
            ));
        }
        Ok(Self { data_block, footer })
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> TimeZoneProviderResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(TimeZoneProviderError::Misc("Illformed TZif data.".into()));
        };
        Self::try_from(parse_result)
    }

    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    /// Returns the UTC offset in effect at `epoch_seconds`.
    pub fn get(&self, epoch_seconds: Seconds) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        let db = &self.data_block;
        match db.transition_times.binary_search(&epoch_seconds) {
            // The new local time type applies from the transition onward.
            Ok(idx) => self.local_time_type(idx),
            // <https://datatracker.ietf.org/doc/html/rfc8536#section-3.2>
            // If there are no transitions, local time for all timestamps is specified by the TZ
            // string in the footer if present and nonempty; otherwise, it is
            // specified by time type 0.
            Err(_) if db.transition_times.is_empty() => Ok(self
                .posix_tz_string()
                .map(|posix| common::resolve_posix_tz_string(posix, epoch_seconds.0))
                .unwrap_or(db.local_time_type_records[0].into())),
            // Before the first transition, time type 0 applies.
            Err(0) => Ok(db.local_time_type_records[0].into()),
            Err(idx) if idx >= db.transition_times.len() => match self.posix_tz_string() {
                Some(posix) => Ok(common::resolve_posix_tz_string(posix, epoch_seconds.0)),
                None => self.local_time_type(idx - 1),
            },
            Err(idx) => self.local_time_type(idx - 1),
        }
    }

    fn local_time_type(&self, transition_idx: usize) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        let db = &self.data_block;
        let type_idx = db
            .transition_types
            .get(transition_idx)
            .copied()
            .unwrap_or(0);
        db.local_time_type_records
            .get(type_idx)
            .map(|record| UtcOffsetSeconds::from(*record))
            .ok_or(TimeZoneProviderError::Assert(
                "TZif transition type out of bounds.",
            ))
    }
}

/// A time zone provider that sources its data from TZif files.
///
/// Parsed zones are cached per canonical identifier.
#[derive(Debug, Default)]
pub struct TzifProvider {
    cache: RwLock<BTreeMap<String, Arc<Tzif>>>,
}

impl TzifProvider {
    /// Returns the canonical identifier and raw TZif bytes for `identifier`.
    fn find(identifier: &str) -> Option<(Cow<'static, str>, Cow<'static, [u8]>)> {
        if let Some((name, data)) = jiff_tzdb::get(identifier) {
            return Some((Cow::Borrowed(name), Cow::Borrowed(data)));
        }
        Self::find_in_zoneinfo_dir(identifier)
    }

    #[cfg(unix)]
    fn find_in_zoneinfo_dir(identifier: &str) -> Option<(Cow<'static, str>, Cow<'static, [u8]>)> {
        // Never let an identifier escape the zoneinfo directory.
        if identifier.is_empty()
            || identifier.starts_with('/')
            || identifier.split('/').any(|part| part == ".." || part == ".")
        {
            return None;
        }
        let mut path = PathBuf::from(ZONEINFO_DIR);
        path.push(identifier);
        let data = std::fs::read(&path).ok()?;
        #[cfg(feature = "log")]
        log::debug!("loaded time zone {identifier} from {}", path.display());
        Some((Cow::Owned(identifier.into()), Cow::Owned(data)))
    }

    #[cfg(not(unix))]
    fn find_in_zoneinfo_dir(_: &str) -> Option<(Cow<'static, str>, Cow<'static, [u8]>)> {
        None
    }

    /// Returns the parsed TZif for a time zone identifier.
    pub fn get(&self, identifier: &str) -> TimeZoneProviderResult<Arc<Tzif>> {
        if let Some(tzif) = self
            .cache
            .read()
            .ok()
            .and_then(|cache| cache.get(identifier).cloned())
        {
            return Ok(tzif);
        }

        #[cfg(feature = "log")]
        log::debug!("time zone cache miss for {identifier}");

        let Some((canonical, data)) = Self::find(identifier) else {
            return Err(TimeZoneProviderError::Range(
                alloc::format!("Unknown time zone identifier: {identifier}").into(),
            ));
        };
        let tzif = Arc::new(Tzif::from_bytes(&data)?);

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(canonical.into_owned(), tzif.clone());
        }
        Ok(tzif)
    }
}

impl TimeZoneProvider for TzifProvider {
    fn normalize_identifier(&self, ident: &'_ [u8]) -> TimeZoneProviderResult<Cow<'_, str>> {
        let identifier = core::str::from_utf8(ident)
            .map_err(|_| TimeZoneProviderError::Range("Time zone identifier is not UTF-8.".into()))?;
        Self::find(identifier)
            .map(|(canonical, _)| Cow::Owned(canonical.into_owned()))
            .ok_or_else(|| {
                TimeZoneProviderError::Range(
                    alloc::format!("Unknown time zone identifier: {identifier}").into(),
                )
            })
    }

    fn get_named_tz_offset_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> TimeZoneProviderResult<UtcOffsetSeconds> {
        self.get(identifier)?.get(Seconds(epoch_seconds))
    }
}
