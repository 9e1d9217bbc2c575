//! Two-letter region codes accepted on customer addresses.
//!
//! The accepted set is the 50 US states plus DC, Guam, Puerto Rico and the
//! US Virgin Islands. Codes are case-sensitive: `"CA"` is valid, `"ca"` is not.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned for a code outside the accepted set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("state must be a valid two-letter state code")]
pub struct StateCodeError;

macro_rules! state_codes {
    ($($code:ident),+ $(,)?) => {
        /// A region code from the fixed enumerated set.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum StateCode {
            $($code,)+
        }

        impl StateCode {
            /// Every accepted code, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$code,)+];

            /// The two-letter code.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$code => stringify!($code),)+
                }
            }
        }

        impl FromStr for StateCode {
            type Err = StateCodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($code) => Ok(Self::$code),)+
                    _ => Err(StateCodeError),
                }
            }
        }
    };
}

state_codes!(
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL, GA, GU, HI, ID, IL, IN, IA, KS, KY, LA, ME, MD, MA,
    MI, MN, MS, MO, MT, NE, NV, NH, NJ, NM, NY, NC, ND, OH, OK, OR, PA, PR, RI, SC, SD, TN, TX,
    UT, VT, VA, VI, WA, WV, WI, WY,
);

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored as TEXT; a value outside the set means the row was written by
// something other than this service.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for StateCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for StateCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for StateCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
