//! SQL column adapter for documents.
//!
//! Enables a [`Document`] as a typed column: documents travel as JSON text.
//! Decoding follows the addressing library's conventions rather than the
//! driver's: a SQL `NULL` becomes a document whose root is the literal
//! string `"null"`, and text or byte values are JSON-decoded. Encoding
//! serializes the document (a view serializes its subtree).
//!
//! Available behind the `sqlite` and `postgres` features. Documents stay
//! single-threaded; decode rows on the thread that will use them.

#[cfg(feature = "postgres")]
mod postgres {
    use serde_json::Value;
    use sqlx::encode::IsNull;
    use sqlx::error::BoxDynError;
    use sqlx::postgres::{PgTypeInfo, PgValueRef, Postgres};
    use sqlx::{Database, Decode, Encode, Type, ValueRef};

    use crate::Document;

    impl Type<Postgres> for Document {
        fn type_info() -> PgTypeInfo {
            <&str as Type<Postgres>>::type_info()
        }

        fn compatible(ty: &PgTypeInfo) -> bool {
            <&str as Type<Postgres>>::compatible(ty)
        }
    }

    impl<'q> Encode<'q, Postgres> for Document {
        fn encode_by_ref(
            &self,
            buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
        ) -> Result<IsNull, BoxDynError> {
            let json = serde_json::to_string(self)?;
            <String as Encode<'q, Postgres>>::encode(json, buf)
        }
    }

    impl<'r> Decode<'r, Postgres> for Document {
        fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
            if value.is_null() {
                return Ok(Document::from_value(Value::String("null".into())));
            }
            let text = <&str as Decode<'r, Postgres>>::decode(value)?;
            Ok(Document::from_json(text)?)
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use serde_json::Value;
    use sqlx::encode::IsNull;
    use sqlx::error::BoxDynError;
    use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
    use sqlx::{Database, Decode, Encode, Type, ValueRef};

    use crate::Document;

    impl Type<Sqlite> for Document {
        fn type_info() -> SqliteTypeInfo {
            <&str as Type<Sqlite>>::type_info()
        }

        fn compatible(ty: &SqliteTypeInfo) -> bool {
            <&str as Type<Sqlite>>::compatible(ty) || <&[u8] as Type<Sqlite>>::compatible(ty)
        }
    }

    impl<'q> Encode<'q, Sqlite> for Document {
        fn encode_by_ref(
            &self,
            buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
        ) -> Result<IsNull, BoxDynError> {
            let json = serde_json::to_string(self)?;
            <String as Encode<'q, Sqlite>>::encode(json, buf)
        }
    }

    impl<'r> Decode<'r, Sqlite> for Document {
        fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
            if value.is_null() {
                return Ok(Document::from_value(Value::String("null".into())));
            }
            let bytes = <&[u8] as Decode<'r, Sqlite>>::decode(value)?;
            Ok(Document::from_slice(bytes)?)
        }
    }
}
