//! JNI methods for nextflow.quilt.jep.Quilt
//!
//! The first call to any of these links `quilt_rs` (see [`shared_bridge`]); a
//! failed link is rethrown as `UnsatisfiedLinkError` on every later call.

use crate::core::shared_bridge;
use crate::ext::jni::{JniResult, JniResultExt, read_string};
use jni::JNIEnv;
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use std::ptr;

#[unsafe(no_mangle)]
pub extern "system" fn Java_nextflow_quilt_jep_Quilt_commit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    domain: JString<'local>,
    namespace: JString<'local>,
    message: JString<'local>,
) -> jstring {
    (|| -> JniResult<jstring> {
        let bridge = shared_bridge()?;

        let domain = read_string(&mut env, &domain)?;
        let namespace = read_string(&mut env, &namespace)?;
        let message = read_string(&mut env, &message)?;

        let result = bridge.commit(&domain, &namespace, &message)?;
        Ok(env.new_string(result)?.into_raw())
    })()
    .or_throw(&mut env, ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_nextflow_quilt_jep_Quilt_install<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    domain: JString<'local>,
    uri: JString<'local>,
) -> jstring {
    (|| -> JniResult<jstring> {
        let bridge = shared_bridge()?;

        let domain = read_string(&mut env, &domain)?;
        let uri = read_string(&mut env, &uri)?;

        let result = bridge.install(&domain, &uri)?;
        Ok(env.new_string(result)?.into_raw())
    })()
    .or_throw(&mut env, ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_nextflow_quilt_jep_Quilt_push<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    domain: JString<'local>,
    namespace: JString<'local>,
) -> jstring {
    (|| -> JniResult<jstring> {
        let bridge = shared_bridge()?;

        let domain = read_string(&mut env, &domain)?;
        let namespace = read_string(&mut env, &namespace)?;

        let result = bridge.push(&domain, &namespace)?;
        Ok(env.new_string(result)?.into_raw())
    })()
    .or_throw(&mut env, ptr::null_mut())
}
