//! JNI helpers shared by the exported methods

use crate::core::BridgeError;
use jni::JNIEnv;
use jni::objects::JString;
use log::error;

pub type JniResult<T> = anyhow::Result<T>;

const RUNTIME_EXCEPTION: &str = "java/lang/RuntimeException";
const NULL_POINTER_EXCEPTION: &str = "java/lang/NullPointerException";

pub trait JniResultExt<T> {
    /// Throws the error into the JVM and returns `fallback` in its place.
    fn or_throw(self, env: &mut JNIEnv, fallback: T) -> T;
}

impl<T> JniResultExt<T> for JniResult<T> {
    fn or_throw(self, env: &mut JNIEnv, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                throw(env, &err);
                fallback
            },
        }
    }
}

/// Java exception class used for `err`.
pub fn exception_class(err: &anyhow::Error) -> &'static str {
    if let Some(bridge_err) = err.downcast_ref::<BridgeError>() {
        return bridge_err.java_exception_class();
    }

    match err.downcast_ref::<jni::errors::Error>() {
        Some(jni::errors::Error::NullPtr(_)) | Some(jni::errors::Error::NullDeref(_)) => {
            NULL_POINTER_EXCEPTION
        },
        _ => RUNTIME_EXCEPTION,
    }
}

fn throw(env: &mut JNIEnv, err: &anyhow::Error) {
    // A failed JNI call leaves its own exception pending; keep that one.
    if env.exception_check().unwrap_or(false) {
        error!("JNI call failed with a pending exception: {:#}", err);
        return;
    }

    let class = exception_class(err);
    error!("throwing {}: {:#}", class, err);
    if let Err(e) = env.throw_new(class, format!("{:#}", err)) {
        error!("failed to throw {}: {}", class, e);
    }
}

/// Copies a Java string into Rust.
pub fn read_string(env: &mut JNIEnv, value: &JString) -> JniResult<String> {
    Ok(env.get_string(value)?.into())
}
