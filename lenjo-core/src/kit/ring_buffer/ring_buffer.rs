use std::sync::{Arc, Condvar, Mutex};
use thiserror::Error;

/// 环形缓冲区的错误类型
#[derive(Debug, Error, PartialEq)]
pub enum RingBufferError {
    /// 向已关闭的缓冲区写入
    #[error("Cannot push to closed ring buffer")]
    BufferClosed,

    /// 从已关闭且为空的缓冲区读取
    #[error("Cannot pop from empty and closed ring buffer")]
    BufferClosedAndEmpty,

    /// 互斥锁被污染（poisoned）
    #[error("Mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// 访问位置超出当前数据量
    #[error("Index {0} out of bounds for buffer size {1}")]
    IndexOutOfBounds(usize, usize),
}

/// 线程安全的字节环形缓冲区
///
/// 生产者 feed 源文本字节，消费者（字符流）逐字节拉取。
/// 关闭后不再接受写入，读尽即报 EOF。
pub struct RingBuffer {
    inner: Mutex<Inner>,
    not_full: Condvar,
    not_empty: Condvar,
}

/// 受 Mutex 保护的内部状态
struct Inner {
    buffer: Vec<u8>,
    capacity: usize,
    head: usize,  // 读取指针
    tail: usize,  // 写入指针
    size: usize,  // 当前数据量
    closed: bool, // 关闭标记
}

impl RingBuffer {
    /// 创建新的环形缓冲区，返回 Arc 指针以便生产者/消费者共享
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(RingBuffer {
            inner: Mutex::new(Inner {
                buffer: vec![0; capacity],
                capacity,
                head: 0,
                tail: 0,
                size: 0,
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        })
    }

    /// 写入一个字节（阻塞式）：满时等待消费者腾出空间，关闭后拒绝写入
    pub fn push(&self, item: u8) -> Result<(), RingBufferError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| RingBufferError::MutexPoisoned(e.to_string()))?;

        while inner.size == inner.capacity && !inner.closed {
            inner = self
                .not_full
                .wait(inner)
                .map_err(|e| RingBufferError::MutexPoisoned(e.to_string()))?;
        }

        if inner.closed {
            return Err(RingBufferError::BufferClosed);
        }

        let tail = inner.tail;
        inner.buffer[tail] = item;
        inner.tail = (tail + 1) % inner.capacity;
        inner.size += 1;

        self.not_empty.notify_one();

        Ok(())
    }

    /// 读出一个字节（阻塞式）：空时等待生产者，关闭且读尽时返回错误
    pub fn pop(&self) -> Result<u8, RingBufferError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| RingBufferError::MutexPoisoned(e.to_string()))?;

        while inner.size == 0 && !inner.closed {
            inner = self
                .not_empty
                .wait(inner)
                .map_err(|e| RingBufferError::MutexPoisoned(e.to_string()))?;
        }

        if inner.size == 0 && inner.closed {
            return Err(RingBufferError::BufferClosedAndEmpty);
        }

        let item = inner.buffer[inner.head];
        inner.head = (inner.head + 1) % inner.capacity;
        inner.size -= 1;

        self.not_full.notify_one();

        Ok(item)
    }

    /// 观察第 k 个未读字节（非阻塞式，不消费）
    pub fn try_peek_k(&self, k: usize) -> Option<Result<u8, RingBufferError>> {
        let inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(e) => return Some(Err(RingBufferError::MutexPoisoned(e.to_string()))),
        };

        if k >= inner.size {
            return Some(Err(RingBufferError::IndexOutOfBounds(k, inner.size)));
        }

        let index = (inner.head + k) % inner.capacity;
        Some(Ok(inner.buffer[index]))
    }

    /// 关闭缓冲区：不再接受新数据，唤醒所有等待线程
    pub fn close(&self) -> Result<(), RingBufferError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| RingBufferError::MutexPoisoned(e.to_string()))?;
        inner.closed = true;
        self.not_full.notify_all();
        self.not_empty.notify_all();
        Ok(())
    }

    /// 缓冲区是否为空
    pub fn is_empty(&self) -> Result<bool, RingBufferError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| RingBufferError::MutexPoisoned(e.to_string()))?;
        Ok(inner.size == 0)
    }

    /// 当前缓冲区中的数据量
    pub fn get_size(&self) -> Result<usize, RingBufferError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| RingBufferError::MutexPoisoned(e.to_string()))?;
        Ok(inner.size)
    }
}
